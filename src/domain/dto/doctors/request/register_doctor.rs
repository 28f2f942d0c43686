//! # 의사 등록 요청 DTO
//!
//! 관리자 콘솔이 multipart 요청의 `doctor` 파트에 담아 보내는 JSON 문서입니다.
//!
//! ## 검증 규칙
//!
//! 모든 필드는 `Option`으로 받고, 필수 여부는 서비스 계층에서 필드별 메시지로 검증합니다.
//! 검증 순서는 아래 표의 순서와 같습니다.
//!
//! | 필드 | 규칙 | 실패 메시지 |
//! |------|------|-------------|
//! | `name` | 필수 | `Doctor name is required.` |
//! | `email` | 필수 | `Doctor email is required.` |
//! | `phone` | 필수 | `Doctor phone is required.` |
//! | `password` | 필수 | `Doctor password is required.` |
//! | `specialization` | 필수 | `Doctor specialization is required.` |
//! | `gender` | 필수, MALE/FEMALE/OTHER | `Gender is required.` |
//! | `email` | 이메일 형식 | `Doctor email must be a valid email address.` |
//!
//! 문자열 필드는 역직렬화 시점에 앞뒤 공백이 제거되며, 빈 문자열은 `None`이 됩니다.
//! 비밀번호는 공백도 의미가 있으므로 그대로 유지합니다.
//!
//! ## 요청 예제
//!
//! ```json
//! {
//!   "name": "Dr. Kim",
//!   "email": "kim@clinic.com",
//!   "phone": "010-1234-5678",
//!   "password": "s3cret",
//!   "specialization": "Cardiology",
//!   "gender": "female",
//!   "dob": "1980-05-17"
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 의사 등록 요청
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterDoctorRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "Doctor email must be a valid email address."))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub specialization: Option<String>,

    /// 대소문자 구분 없이 MALE/FEMALE/OTHER
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub gender: Option<String>,

    /// 생략하면 ACTIVE
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,

    #[serde(default)]
    pub dob: Option<NaiveDate>,
}

impl RegisterDoctorRequest {
    /// multipart `doctor` 파트의 JSON 텍스트를 파싱합니다.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}
