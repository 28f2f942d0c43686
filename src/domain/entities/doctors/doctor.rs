//! Doctor Entity Implementation
//!
//! 의사 레코드 엔티티와 성별/상태 열거형을 정의합니다.
//! MongoDB `doctors` 컬렉션의 문서 구조와 1:1로 대응합니다.

use std::fmt;
use std::str::FromStr;
use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, spec::BinarySubtype, Binary, DateTime};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;

/// 의사 성별
///
/// 문자열 변환은 대소문자를 구분하지 않으며 직렬화는 항상 대문자입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALLOWED_VALUES: &'static str = "MALE, FEMALE, OTHER";

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            "OTHER" => Ok(Gender::Other),
            _ => Err(format!(
                "Invalid gender provided. Allowed values: {}.",
                Self::ALLOWED_VALUES
            )),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 의사 계정 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum DoctorStatus {
    #[default]
    Active,
    Inactive,
}

impl DoctorStatus {
    pub const ALLOWED_VALUES: &'static str = "ACTIVE, INACTIVE";

    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorStatus::Active => "ACTIVE",
            DoctorStatus::Inactive => "INACTIVE",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DoctorStatus::Active)
    }
}

impl FromStr for DoctorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(DoctorStatus::Active),
            "INACTIVE" => Ok(DoctorStatus::Inactive),
            _ => Err(format!(
                "Invalid status provided. Allowed values: {}.",
                Self::ALLOWED_VALUES
            )),
        }
    }
}

impl TryFrom<String> for DoctorStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 의사 레코드
///
/// `password_hash`는 bcrypt 해시만 저장되며 응답 DTO로 변환될 때 제거됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub specialization: String,
    pub gender: Gender,
    pub status: DoctorStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_image: Option<Binary>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 신규 레코드 생성에 필요한 값 묶음
#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub specialization: String,
    pub gender: Gender,
    pub status: DoctorStatus,
    pub dob: Option<NaiveDate>,
    pub image: Option<Vec<u8>>,
}

impl Doctor {
    /// 아직 저장되지 않은 새 레코드를 만듭니다. 두 타임스탬프는 현재 시각입니다.
    pub fn new(new_doctor: NewDoctor) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name: new_doctor.name,
            email: new_doctor.email,
            phone: new_doctor.phone,
            password_hash: new_doctor.password_hash,
            specialization: new_doctor.specialization,
            gender: new_doctor.gender,
            status: new_doctor.status,
            dob: new_doctor.dob,
            doctor_image: new_doctor.image.map(image_binary),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn set_image(&mut self, bytes: Vec<u8>) {
        self.doctor_image = Some(image_binary(bytes));
    }

    pub fn image_bytes(&self) -> Option<&[u8]> {
        self.doctor_image.as_ref().map(|binary| binary.bytes.as_slice())
    }

    /// 수정 시각을 현재로 갱신합니다.
    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}

fn image_binary(bytes: Vec<u8>) -> Binary {
    Binary {
        subtype: BinarySubtype::Generic,
        bytes,
    }
}

/// 경로 파라미터의 의사 ID를 ObjectId로 변환합니다.
pub fn parse_doctor_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError(format!("Invalid doctor ID format: {}", id)))
}
