pub mod doctor_repo;
pub mod memory_repo;

pub use doctor_repo::MongoDoctorRepository;
pub use memory_repo::InMemoryDoctorRepository;
