//! # 의사 리포지토리 (MongoDB)
//!
//! `doctors` 컬렉션에 대한 데이터 액세스를 담당합니다.
//!
//! ## 인덱스
//!
//! | 이름 | 키 | 속성 |
//! |------|----|------|
//! | `email_unique` | `email: 1` | UNIQUE |
//! | `phone_unique` | `phone: 1` | UNIQUE |
//! | `created_at_desc` | `created_at: -1` | 목록 정렬 |
//! | `specialization` | `specialization: 1` | 분야별 조회 |
//!
//! 서비스의 사전 중복 확인과 별개로 유니크 인덱스가 동시 등록 경쟁을 막습니다.
//! 중복 키 쓰기 오류(코드 11000)는 `ConflictError`로 변환됩니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};
use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::doctors::{Doctor, DoctorStatus, Gender},
    repositories::{DoctorRepository, DUPLICATE_EMAIL, DUPLICATE_PHONE},
};

const COLLECTION_NAME: &str = "doctors";
const DUPLICATE_KEY_CODE: i32 = 11000;
const EMAIL_INDEX: &str = "email_unique";
const PHONE_INDEX: &str = "phone_unique";

/// MongoDB 기반 의사 리포지토리
#[derive(Clone)]
pub struct MongoDoctorRepository {
    collection: Collection<Doctor>,
}

impl MongoDoctorRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection::<Doctor>(COLLECTION_NAME),
        }
    }

    /// 필요한 인덱스를 모두 생성합니다. 이미 있으면 그대로 둡니다.
    ///
    /// 기존 데이터에 이메일/전화번호 중복이 있으면 유니크 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(EMAIL_INDEX.to_string())
                .build())
            .build();

        let phone_index = IndexModel::builder()
            .keys(doc! { "phone": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name(PHONE_INDEX.to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        let specialization_index = IndexModel::builder()
            .keys(doc! { "specialization": 1 })
            .options(IndexOptions::builder()
                .name("specialization".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, phone_index, created_at_index, specialization_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("doctors 컬렉션 인덱스 준비 완료");
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> AppResult<Option<Doctor>> {
        self.collection
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 최신 등록 순으로 정렬된 다건 조회
    async fn find_many(&self, filter: Document) -> AppResult<Vec<Doctor>> {
        let cursor = self.collection
            .find(filter)
            .sort(doc! { "created_at": -1, "_id": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

/// 중복 키 쓰기 오류를 어느 필드의 충돌인지 구분하여 변환합니다.
fn map_write_error(error: MongoError) -> AppError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = error.kind.as_ref() {
        if write_error.code == DUPLICATE_KEY_CODE {
            return AppError::ConflictError(duplicate_key_message(&write_error.message).to_string());
        }
    }

    AppError::DatabaseError(error.to_string())
}

/// E11000 메시지의 인덱스 이름으로 충돌 필드를 판단합니다.
///
/// 메시지 뒤쪽의 `dup key: { ... }`에는 중복된 값이 그대로 들어 있으므로
/// 값이 아닌 `index: <이름>` 부분만 봅니다.
fn duplicate_key_message(message: &str) -> &'static str {
    let index = message
        .split("index: ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or_default();

    if index == PHONE_INDEX {
        DUPLICATE_PHONE
    } else {
        DUPLICATE_EMAIL
    }
}

#[async_trait]
impl DoctorRepository for MongoDoctorRepository {
    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Doctor>> {
        self.find_one(doc! { "_id": *id }).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Doctor>> {
        self.find_one(doc! { "email": email }).await
    }

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Doctor>> {
        self.find_one(doc! { "phone": phone }).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Doctor>> {
        self.find_many(doc! { "name": name }).await
    }

    async fn find_by_gender(&self, gender: Gender) -> AppResult<Vec<Doctor>> {
        self.find_many(doc! { "gender": gender.as_str() }).await
    }

    async fn find_by_specialization(&self, specialization: &str) -> AppResult<Vec<Doctor>> {
        self.find_many(doc! { "specialization": specialization }).await
    }

    async fn find_by_status(&self, status: DoctorStatus) -> AppResult<Vec<Doctor>> {
        self.find_many(doc! { "status": status.as_str() }).await
    }

    async fn find_page(&self, skip: u64, limit: u64) -> AppResult<Vec<Doctor>> {
        let limit = i64::try_from(limit)
            .map_err(|_| AppError::ValidationError("Page size is too large.".to_string()))?;

        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_specializations(&self) -> AppResult<Vec<String>> {
        let values = self.collection
            .distinct("specialization", doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let mut specializations: Vec<String> = values
            .into_iter()
            .filter_map(|value| value.as_str().map(str::to_string))
            .collect();
        specializations.sort();

        Ok(specializations)
    }

    async fn save(&self, mut doctor: Doctor) -> AppResult<Doctor> {
        match doctor.id {
            Some(id) => {
                let result = self.collection
                    .replace_one(doc! { "_id": id }, &doctor)
                    .await
                    .map_err(map_write_error)?;

                if result.matched_count == 0 {
                    return Err(AppError::NotFound(format!(
                        "Doctor with ID {} not found.",
                        id.to_hex()
                    )));
                }
                debug!("doctor 문서 교체: {}", id.to_hex());
            }
            None => {
                let result = self.collection
                    .insert_one(&doctor)
                    .await
                    .map_err(map_write_error)?;

                let id = result.inserted_id.as_object_id().ok_or_else(|| {
                    AppError::InternalError("Inserted document has no ObjectId".to_string())
                })?;
                doctor.id = Some(id);
                debug!("doctor 문서 삽입: {}", id.to_hex());
            }
        }

        Ok(doctor)
    }

    async fn delete_by_id(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
