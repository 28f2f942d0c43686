use serde::{Deserialize, Serialize};
use validator::Validate;

/// 의사 로그인 요청 DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DoctorLoginRequest {
    #[validate(email(message = "Doctor email must be a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, message = "Doctor password is required."))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let valid = DoctorLoginRequest {
            email: "kim@clinic.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_password = DoctorLoginRequest {
            email: "kim@clinic.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());

        let bad_email = DoctorLoginRequest {
            email: "kim".to_string(),
            password: "pw".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }
}
