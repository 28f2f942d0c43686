//! # 의사 정보 수정 요청 DTO
//!
//! `PUT /admin/updateDoctor/{id}`의 JSON 본문입니다.
//!
//! - `name`, `email`, `phone`, `specialization`, `gender`는 등록과 같은 메시지로 필수 검증
//! - `status`는 생략 시 기존 상태 유지
//! - `dob`는 주어진 값으로 덮어씀 (생략 시 제거)
//! - `doctor_image`는 base64 문자열, 생략 시 기존 이미지 유지
//! - `password`는 비어 있지 않을 때만 다시 해싱하여 교체

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDoctorRequest {
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

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub gender: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,

    #[serde(default)]
    pub dob: Option<NaiveDate>,

    /// base64 인코딩된 이미지
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub doctor_image: Option<String>,
}
