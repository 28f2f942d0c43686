//! 의사 요청 DTO

pub mod register_doctor;
pub mod update_doctor;
pub mod login;

pub use register_doctor::RegisterDoctorRequest;
pub use update_doctor::UpdateDoctorRequest;
pub use login::DoctorLoginRequest;
