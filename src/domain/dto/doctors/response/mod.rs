//! 의사 응답 DTO

pub mod doctor_response;

pub use doctor_response::{
    CountResponse, DoctorLoginResponse, DoctorResponse, MessageResponse, RegisterDoctorResponse,
};
