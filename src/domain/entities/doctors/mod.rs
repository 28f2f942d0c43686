//! 의사 엔티티 모듈

pub mod doctor;

pub use doctor::{parse_doctor_id, Doctor, DoctorStatus, Gender, NewDoctor};
