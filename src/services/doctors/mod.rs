//! 의사 레코드 서비스

pub mod doctor_service;

pub use doctor_service::DoctorService;
