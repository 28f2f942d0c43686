use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{NaiveDate, Utc};
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use crate::domain::entities::doctors::{Doctor, DoctorStatus, Gender};

/// 의사 응답 DTO
///
/// 비밀번호 해시는 포함하지 않습니다. 이미지는 base64 문자열,
/// 타임스탬프는 RFC 3339 문자열로 내보냅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub gender: Gender,
    pub status: DoctorStatus,
    pub dob: Option<NaiveDate>,
    pub doctor_image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Doctor> for DoctorResponse {
    fn from(doctor: Doctor) -> Self {
        let Doctor {
            id,
            name,
            email,
            phone,
            specialization,
            gender,
            status,
            dob,
            doctor_image,
            created_at,
            updated_at,
            ..
        } = doctor;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            email,
            phone,
            specialization,
            gender,
            status,
            dob,
            doctor_image: doctor_image.map(|binary| STANDARD.encode(binary.bytes)),
            created_at: to_rfc3339(created_at),
            updated_at: to_rfc3339(updated_at),
        }
    }
}

fn to_rfc3339(value: DateTime) -> String {
    chrono::DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .unwrap_or_default()
        .to_rfc3339()
}

/// 의사 등록 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDoctorResponse {
    pub doctor: DoctorResponse,
    pub message: String,
}

/// 의사 로그인 응답 DTO (JWT 토큰 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorLoginResponse {
    pub doctor: DoctorResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// 메시지만 담는 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// 전체 레코드 수 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use crate::domain::entities::doctors::NewDoctor;

    #[test]
    fn test_response_hides_password_and_encodes_image() {
        let mut doctor = Doctor::new(NewDoctor {
            name: "Dr. Kim".to_string(),
            email: "kim@clinic.com".to_string(),
            phone: "010".to_string(),
            password_hash: "$2b$04$secret-hash".to_string(),
            specialization: "Cardiology".to_string(),
            gender: Gender::Male,
            status: DoctorStatus::Active,
            dob: None,
            image: Some(b"img".to_vec()),
        });
        let id = ObjectId::new();
        doctor.id = Some(id);

        let response = DoctorResponse::from(doctor);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], id.to_hex());
        assert_eq!(json["doctor_image"], "aW1n");
        assert_eq!(json["gender"], "MALE");
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("secret-hash"));
        assert!(chrono::DateTime::parse_from_rfc3339(&response.created_at).is_ok());
    }
}
