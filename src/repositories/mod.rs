//! # 리포지토리 계층
//!
//! 의사 레코드의 데이터 액세스를 [`DoctorRepository`] 트레이트 뒤로 숨깁니다.
//! 서비스는 `Arc<dyn DoctorRepository>`만 알고 있으므로 MongoDB 없이도
//! 메모리 구현으로 동일한 비즈니스 규칙을 검증할 수 있습니다.
//!
//! | 구현 | 용도 |
//! |------|------|
//! | [`doctors::MongoDoctorRepository`] | 운영 (`STORAGE_BACKEND=mongodb`) |
//! | [`doctors::InMemoryDoctorRepository`] | 로컬 실행, 테스트 (`STORAGE_BACKEND=memory`) |
//!
//! ## 공통 계약
//!
//! - 다건 조회는 `created_at` 내림차순으로 정렬됩니다.
//! - `save`는 ID가 없으면 삽입, 있으면 전체 교체합니다.
//! - 이메일/전화번호 유일성 위반은 `AppError::ConflictError`로 보고됩니다.
//! - 저장소 오류는 `AppError::DatabaseError`로 보고됩니다.

pub mod doctors;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use crate::core::errors::AppResult;
use crate::domain::entities::doctors::{Doctor, DoctorStatus, Gender};

/// 이메일 유일성 위반 메시지
pub const DUPLICATE_EMAIL: &str = "A doctor with this email already exists.";
/// 전화번호 유일성 위반 메시지
pub const DUPLICATE_PHONE: &str = "A doctor with this phone number already exists.";

/// 의사 레코드 저장소
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// 저장소 초기화 (인덱스 생성 등). 기본 구현은 아무것도 하지 않습니다.
    async fn init(&self) -> AppResult<()> {
        Ok(())
    }

    /// 기동 화면에 표시할 저장소 이름
    fn backend_name(&self) -> &'static str;

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Doctor>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Doctor>>;

    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<Doctor>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Doctor>>;

    async fn find_by_gender(&self, gender: Gender) -> AppResult<Vec<Doctor>>;

    async fn find_by_specialization(&self, specialization: &str) -> AppResult<Vec<Doctor>>;

    async fn find_by_status(&self, status: DoctorStatus) -> AppResult<Vec<Doctor>>;

    /// `created_at` 내림차순으로 `skip`개를 건너뛰고 최대 `limit`개를 반환합니다.
    async fn find_page(&self, skip: u64, limit: u64) -> AppResult<Vec<Doctor>>;

    /// 중복 없는 전문 분야 목록 (오름차순)
    async fn find_specializations(&self) -> AppResult<Vec<String>>;

    /// 삽입 또는 교체 후 저장된 레코드를 반환합니다.
    async fn save(&self, doctor: Doctor) -> AppResult<Doctor>;

    /// 삭제되었으면 `true`
    async fn delete_by_id(&self, id: &ObjectId) -> AppResult<bool>;

    async fn count(&self) -> AppResult<u64>;
}
