//! # 의사 레코드 관리 서비스 구현
//!
//! 의사 레코드의 등록, 조회, 상태 변경, 수정, 삭제와 의사 로그인 검증을 담당합니다.
//!
//! ## 서비스 아키텍처
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        DoctorService                          │
//! │                                                               │
//! │  Registration        Query               Mutation             │
//! │  • 필수 필드 검증      • ID/이메일/전화     • 상태 변경            │
//! │  • 중복 확인          • 이름/성별/분야/상태 • 정보 수정            │
//! │  • 비밀번호 해싱       • 페이지 목록        • 삭제                │
//! └───────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//!   Arc<dyn DoctorRepository>          Arc<dyn PasswordHasher>
//! ```
//!
//! ## 에러 규칙
//!
//! 모든 공개 연산은 내부 구현의 결과에 [`ErrorContext::context`]를 적용합니다.
//! 검증/없음/중복 에러는 그대로 전달되고, 저장소나 해싱 실패처럼 예상하지 못한
//! 오류만 `"<작업 문맥>: <원인>"` 형태의 `OperationError`로 바뀝니다.
//!
//! | 연산 | 작업 문맥 |
//! |------|-----------|
//! | `register` | `Error registering doctor` |
//! | `list_all` | `Error retrieving doctors` |
//! | `get_by_id` | `Error retrieving doctor` |
//! | `get_by_email` | `Error retrieving doctor by email` |
//! | `update_status` | `Error updating doctor status` |
//! | `update` | `Error updating doctor` |
//! | `delete_by_id` | `Error deleting doctor` |

use std::sync::Arc;
use std::time::Instant;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, info, warn};
use validator::Validate;
use crate::{
    core::errors::{AppError, AppResult, ErrorContext},
    domain::{
        dto::{
            CountResponse, DoctorResponse, MessageResponse, Page, RegisterDoctorRequest,
            RegisterDoctorResponse, UpdateDoctorRequest,
        },
        entities::doctors::{parse_doctor_id, Doctor, DoctorStatus, Gender, NewDoctor},
    },
    repositories::{DoctorRepository, DUPLICATE_EMAIL, DUPLICATE_PHONE},
    services::auth::PasswordHasher,
    utils::string_utils::{first_validation_message, require_field, require_secret},
};

const NAME_REQUIRED: &str = "Doctor name is required.";
const EMAIL_REQUIRED: &str = "Doctor email is required.";
const PHONE_REQUIRED: &str = "Doctor phone is required.";
const PASSWORD_REQUIRED: &str = "Doctor password is required.";
const SPECIALIZATION_REQUIRED: &str = "Doctor specialization is required.";
const GENDER_REQUIRED: &str = "Gender is required.";

const REGISTER_DUPLICATE_EMAIL: &str =
    "A doctor with this email already exists. Please use a different email.";
const REGISTER_DUPLICATE_PHONE: &str =
    "A doctor with this phone number already exists. Please use a different phone number.";

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// 의사 레코드 비즈니스 로직 서비스
///
/// 저장소와 해셔는 트레이트 객체로 주입됩니다.
///
/// # 예제
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use crate::repositories::doctors::InMemoryDoctorRepository;
/// use crate::services::auth::BcryptPasswordHasher;
///
/// let service = DoctorService::new(
///     Arc::new(InMemoryDoctorRepository::new()),
///     Arc::new(BcryptPasswordHasher::new(4)),
/// );
/// let created = service.register(r#"{"name":"Dr. Kim", ...}"#, None).await?;
/// ```
pub struct DoctorService {
    repo: Arc<dyn DoctorRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

/// 필수 검증을 통과한 수정 값
struct ValidatedUpdate {
    name: String,
    email: String,
    phone: String,
    specialization: String,
    gender: Gender,
}

impl DoctorService {
    pub fn new(repo: Arc<dyn DoctorRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    pub fn backend_name(&self) -> &'static str {
        self.repo.backend_name()
    }

    /// 의사 등록
    ///
    /// `payload`는 multipart `doctor` 파트의 JSON 텍스트입니다.
    /// 비어 있지 않은 `image`는 그대로 레코드에 첨부됩니다.
    ///
    /// # 검증 순서
    ///
    /// 1. JSON 파싱 (`Error registering doctor: <parser message>`)
    /// 2. 이름, 이메일, 전화번호, 비밀번호, 전문 분야, 성별 필수 확인
    /// 3. 이메일 형식
    /// 4. 이메일 중복, 전화번호 중복
    pub async fn register(
        &self,
        payload: &str,
        image: Option<Vec<u8>>,
    ) -> AppResult<RegisterDoctorResponse> {
        let request = RegisterDoctorRequest::from_json(payload).map_err(|e| {
            AppError::OperationError(format!("Error registering doctor: {}", e))
        })?;

        self.register_doctor(request, image)
            .await
            .context("Error registering doctor")
    }

    async fn register_doctor(
        &self,
        request: RegisterDoctorRequest,
        image: Option<Vec<u8>>,
    ) -> AppResult<RegisterDoctorResponse> {
        let started = Instant::now();

        let name = require_field(request.name.as_deref(), NAME_REQUIRED)?;
        let email = require_field(request.email.as_deref(), EMAIL_REQUIRED)?;
        let phone = require_field(request.phone.as_deref(), PHONE_REQUIRED)?;
        let password = require_secret(request.password.as_deref(), PASSWORD_REQUIRED)?;
        let specialization =
            require_field(request.specialization.as_deref(), SPECIALIZATION_REQUIRED)?;
        let gender = parse_gender(request.gender.as_deref())?;
        let status = match request.status.as_deref() {
            Some(status) => status.parse::<DoctorStatus>().map_err(AppError::ValidationError)?,
            None => DoctorStatus::default(),
        };

        request
            .validate()
            .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError(REGISTER_DUPLICATE_EMAIL.to_string()));
        }
        if self.repo.find_by_phone(&phone).await?.is_some() {
            return Err(AppError::ConflictError(REGISTER_DUPLICATE_PHONE.to_string()));
        }

        let password_hash = self.hasher.hash(&password)?;

        let doctor = Doctor::new(NewDoctor {
            name,
            email,
            phone,
            password_hash,
            specialization,
            gender,
            status,
            dob: request.dob,
            image: image.filter(|bytes| !bytes.is_empty()),
        });

        let saved = self.repo.save(doctor).await.map_err(registration_conflict)?;

        info!(
            "의사 등록 완료: {} ({}) in {:?}",
            saved.email,
            saved.id_string().unwrap_or_default(),
            started.elapsed()
        );

        Ok(RegisterDoctorResponse {
            doctor: DoctorResponse::from(saved),
            message: "Doctor registered successfully.".to_string(),
        })
    }

    /// 최신 등록 순 페이지 조회
    ///
    /// `page`는 0부터 시작합니다. 결과 페이지가 비어 있으면 NotFound입니다.
    pub async fn list_all(&self, page: u64, size: u64) -> AppResult<Page<DoctorResponse>> {
        self.list_page(page, size)
            .await
            .context("Error retrieving doctors")
    }

    async fn list_page(&self, page: u64, size: u64) -> AppResult<Page<DoctorResponse>> {
        if size < 1 {
            return Err(AppError::ValidationError(
                "Page size must not be less than one.".to_string(),
            ));
        }

        let skip = page
            .checked_mul(size)
            .ok_or_else(|| AppError::ValidationError("Page number is too large.".to_string()))?;

        let total_items = self.repo.count().await?;
        let doctors = self.repo.find_page(skip, size).await?;

        if doctors.is_empty() {
            return Err(AppError::NotFound("No doctors found in the system.".to_string()));
        }

        Ok(Page::new(doctors, page, size, total_items).map(DoctorResponse::from))
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<DoctorResponse> {
        self.load(id)
            .await
            .context("Error retrieving doctor")?
            .map(DoctorResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Doctor with ID {} not found.", id)))
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<DoctorResponse> {
        self.repo
            .find_by_email(email.trim())
            .await
            .context("Error retrieving doctor by email")?
            .map(DoctorResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Doctor with email {} not found.", email)))
    }

    pub async fn get_by_phone(&self, phone: &str) -> AppResult<DoctorResponse> {
        self.repo
            .find_by_phone(phone.trim())
            .await
            .context("Error retrieving doctor by phone")?
            .map(DoctorResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Doctor with phone {} not found.", phone)))
    }

    pub async fn get_by_name(&self, name: &str) -> AppResult<Vec<DoctorResponse>> {
        let doctors = self.repo
            .find_by_name(name.trim())
            .await
            .context("Error retrieving doctors by name")?;

        non_empty(doctors, || format!("No doctors found with name: {}", name))
    }

    /// 성별 문자열은 대소문자를 구분하지 않습니다.
    pub async fn get_by_gender(&self, gender: &str) -> AppResult<Vec<DoctorResponse>> {
        let gender = gender.parse::<Gender>().map_err(AppError::ValidationError)?;
        let doctors = self.repo
            .find_by_gender(gender)
            .await
            .context("Error retrieving doctors by gender")?;

        non_empty(doctors, || format!("No doctors found with gender: {}", gender))
    }

    pub async fn get_by_specialization(
        &self,
        specialization: &str,
    ) -> AppResult<Vec<DoctorResponse>> {
        let doctors = self.repo
            .find_by_specialization(specialization.trim())
            .await
            .context("Error retrieving doctors by specialization")?;

        non_empty(doctors, || {
            format!("No doctors found with specialization: {}", specialization)
        })
    }

    /// 상태 문자열은 대소문자를 구분하지 않습니다.
    pub async fn get_by_status(&self, status: &str) -> AppResult<Vec<DoctorResponse>> {
        let status = status.parse::<DoctorStatus>().map_err(AppError::ValidationError)?;
        let doctors = self.repo
            .find_by_status(status)
            .await
            .context("Error retrieving doctors by status")?;

        non_empty(doctors, || format!("No doctors found with status: {}", status))
    }

    /// 중복 없는 전문 분야 목록. 레코드가 없으면 빈 목록입니다.
    pub async fn list_specializations(&self) -> AppResult<Vec<String>> {
        self.repo
            .find_specializations()
            .await
            .context("Error retrieving specializations")
    }

    /// 상태 변경
    ///
    /// 현재와 같은 상태이면 아무것도 바꾸지 않고 성공 메시지를 돌려줍니다.
    pub async fn update_status(&self, id: &str, status: Option<&str>) -> AppResult<MessageResponse> {
        self.change_status(id, status)
            .await
            .context("Error updating doctor status")
    }

    async fn change_status(&self, id: &str, status: Option<&str>) -> AppResult<MessageResponse> {
        let mut doctor = self.find_existing(id).await?;

        let status = match status.map(str::trim) {
            Some(status) if !status.is_empty() => status,
            _ => return Err(AppError::ValidationError("Status cannot be empty.".to_string())),
        };
        let new_status = status.parse::<DoctorStatus>().map_err(AppError::ValidationError)?;

        if doctor.status == new_status {
            return Ok(MessageResponse::new(format!(
                "Doctor status is already {}.",
                new_status
            )));
        }

        doctor.status = new_status;
        doctor.touch();
        self.repo.save(doctor).await?;

        info!("의사 상태 변경: {} -> {}", id, new_status);
        Ok(MessageResponse::new(format!(
            "Doctor status updated successfully to {}.",
            new_status
        )))
    }

    /// 의사 정보 수정
    ///
    /// 이메일이나 전화번호가 바뀐 경우에만 다른 레코드와의 중복을 확인합니다.
    pub async fn update(&self, id: &str, request: UpdateDoctorRequest) -> AppResult<MessageResponse> {
        self.update_doctor(id, request)
            .await
            .context("Error updating doctor")
    }

    async fn update_doctor(&self, id: &str, request: UpdateDoctorRequest) -> AppResult<MessageResponse> {
        let mut doctor = self.find_existing(id).await?;
        let fields = validate_update(&request)?;

        if doctor.email != fields.email {
            if let Some(other) = self.repo.find_by_email(&fields.email).await? {
                if other.id != doctor.id {
                    return Err(AppError::ConflictError(DUPLICATE_EMAIL.to_string()));
                }
            }
        }
        if doctor.phone != fields.phone {
            if let Some(other) = self.repo.find_by_phone(&fields.phone).await? {
                if other.id != doctor.id {
                    return Err(AppError::ConflictError(DUPLICATE_PHONE.to_string()));
                }
            }
        }

        if let Some(status) = request.status.as_deref() {
            doctor.status = status.parse::<DoctorStatus>().map_err(AppError::ValidationError)?;
        }
        if let Some(encoded) = request.doctor_image.as_deref() {
            let bytes = STANDARD.decode(encoded).map_err(|_| {
                AppError::ValidationError("Doctor image must be valid base64 data.".to_string())
            })?;
            doctor.set_image(bytes);
        }
        if let Some(password) = request.password.as_deref().filter(|p| !p.trim().is_empty()) {
            doctor.password_hash = self.hasher.hash(password)?;
        }

        doctor.name = fields.name;
        doctor.email = fields.email;
        doctor.phone = fields.phone;
        doctor.specialization = fields.specialization;
        doctor.gender = fields.gender;
        doctor.dob = request.dob;
        doctor.touch();

        self.repo.save(doctor).await?;

        info!("의사 정보 수정: {}", id);
        Ok(MessageResponse::new("Doctor updated successfully."))
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<MessageResponse> {
        let object_id = parse_doctor_id(id)?;

        let deleted = self.repo
            .delete_by_id(&object_id)
            .await
            .context("Error deleting doctor")?;

        if !deleted {
            return Err(AppError::NotFound(format!("Doctor with ID {} not found.", id)));
        }

        info!("의사 삭제: {}", id);
        Ok(MessageResponse::new("Doctor deleted successfully."))
    }

    pub async fn count(&self) -> AppResult<CountResponse> {
        self.repo
            .count()
            .await
            .map(|count| CountResponse { count })
            .context("Error counting doctors")
    }

    /// 의사 로그인 검증
    ///
    /// 알 수 없는 이메일과 틀린 비밀번호는 같은 메시지로 거부합니다.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Doctor> {
        let started = Instant::now();

        let found = self.repo
            .find_by_email(email.trim())
            .await
            .context("Error authenticating doctor")?;

        let doctor = match found {
            Some(doctor) => doctor,
            None => {
                warn!("로그인 실패 (알 수 없는 이메일): {}", email);
                return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !self.hasher.verify(password, &doctor.password_hash) {
            warn!("로그인 실패 (비밀번호 불일치): {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if !doctor.status.is_active() {
            warn!("로그인 거부 (비활성 계정): {}", email);
            return Err(AppError::AuthenticationError("Doctor account is inactive.".to_string()));
        }

        debug!("Doctor authentication took: {:?}", started.elapsed());
        Ok(doctor)
    }

    /// ID 형식을 검증한 뒤 조회합니다.
    async fn load(&self, id: &str) -> AppResult<Option<Doctor>> {
        let object_id = parse_doctor_id(id)?;
        self.repo.find_by_id(&object_id).await
    }

    /// 수정 경로용 조회. 존재하지 않으면 ValidationError (`Doctor with ID <id> not found.`)
    async fn find_existing(&self, id: &str) -> AppResult<Doctor> {
        self.load(id)
            .await?
            .ok_or_else(|| AppError::ValidationError(format!("Doctor with ID {} not found.", id)))
    }
}

fn parse_gender(gender: Option<&str>) -> AppResult<Gender> {
    match gender {
        Some(gender) => gender.parse::<Gender>().map_err(AppError::ValidationError),
        None => Err(AppError::ValidationError(GENDER_REQUIRED.to_string())),
    }
}

fn validate_update(request: &UpdateDoctorRequest) -> AppResult<ValidatedUpdate> {
    let fields = ValidatedUpdate {
        name: require_field(request.name.as_deref(), NAME_REQUIRED)?,
        email: require_field(request.email.as_deref(), EMAIL_REQUIRED)?,
        phone: require_field(request.phone.as_deref(), PHONE_REQUIRED)?,
        specialization: require_field(request.specialization.as_deref(), SPECIALIZATION_REQUIRED)?,
        gender: parse_gender(request.gender.as_deref())?,
    };

    request
        .validate()
        .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

    Ok(fields)
}

fn non_empty<F>(doctors: Vec<Doctor>, not_found: F) -> AppResult<Vec<DoctorResponse>>
where
    F: FnOnce() -> String,
{
    if doctors.is_empty() {
        return Err(AppError::NotFound(not_found()));
    }

    Ok(doctors.into_iter().map(DoctorResponse::from).collect())
}

/// 동시 등록 경쟁에서 저장소가 보고한 중복을 등록용 메시지로 바꿉니다.
fn registration_conflict(error: AppError) -> AppError {
    match error {
        AppError::ConflictError(msg) if msg == DUPLICATE_PHONE => {
            AppError::ConflictError(REGISTER_DUPLICATE_PHONE.to_string())
        }
        AppError::ConflictError(_) => AppError::ConflictError(REGISTER_DUPLICATE_EMAIL.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;
    use crate::repositories::doctors::InMemoryDoctorRepository;
    use crate::services::auth::BcryptPasswordHasher;

    fn service() -> DoctorService {
        DoctorService::new(
            Arc::new(InMemoryDoctorRepository::new()),
            Arc::new(BcryptPasswordHasher::new(4)),
        )
    }

    fn payload(name: &str, email: &str, phone: &str) -> String {
        json!({
            "name": name,
            "email": email,
            "phone": phone,
            "password": "p",
            "specialization": "s",
            "gender": "MALE"
        })
        .to_string()
    }

    async fn register(service: &DoctorService, email: &str, phone: &str) -> DoctorResponse {
        service
            .register(&payload("Dr. Test", email, phone), None)
            .await
            .unwrap()
            .doctor
    }

    fn update_request(doctor: &DoctorResponse) -> UpdateDoctorRequest {
        UpdateDoctorRequest {
            name: Some(doctor.name.clone()),
            email: Some(doctor.email.clone()),
            phone: Some(doctor.phone.clone()),
            password: None,
            specialization: Some(doctor.specialization.clone()),
            gender: Some(doctor.gender.to_string()),
            status: None,
            dob: doctor.dob,
            doctor_image: None,
        }
    }

    fn assert_validation(result: AppResult<impl std::fmt::Debug>, expected: &str) {
        match result {
            Err(AppError::ValidationError(msg)) => assert_eq!(msg, expected),
            other => panic!("expected validation error '{}', got {:?}", expected, other),
        }
    }

    #[actix_web::test]
    async fn test_register_success() {
        let service = service();
        let created = service
            .register(&payload("A", "a@x.com", "1"), Some(b"png".to_vec()))
            .await
            .unwrap();

        assert_eq!(created.message, "Doctor registered successfully.");
        assert_eq!(created.doctor.status, DoctorStatus::Active);
        assert_eq!(created.doctor.doctor_image.as_deref(), Some("cG5n"));
        assert_eq!(created.doctor.created_at, created.doctor.updated_at);
        assert_eq!(service.count().await.unwrap().count, 1);
    }

    #[actix_web::test]
    async fn test_register_duplicate_email_rejected() {
        let service = service();
        register(&service, "a@x.com", "1").await;

        let err = service
            .register(&payload("B", "a@x.com", "2"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ConflictError(msg) if msg == REGISTER_DUPLICATE_EMAIL));
        assert_eq!(service.count().await.unwrap().count, 1);
    }

    #[actix_web::test]
    async fn test_register_duplicate_phone_rejected() {
        let service = service();
        register(&service, "a@x.com", "1").await;

        let err = service
            .register(&payload("B", "b@x.com", "1"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ConflictError(msg) if msg == REGISTER_DUPLICATE_PHONE));
    }

    #[actix_web::test]
    async fn test_register_required_fields() {
        let service = service();
        let base = json!({
            "name": "A",
            "email": "a@x.com",
            "phone": "1",
            "password": "p",
            "specialization": "s",
            "gender": "FEMALE"
        });

        let cases = [
            ("name", NAME_REQUIRED),
            ("email", EMAIL_REQUIRED),
            ("phone", PHONE_REQUIRED),
            ("password", PASSWORD_REQUIRED),
            ("specialization", SPECIALIZATION_REQUIRED),
            ("gender", GENDER_REQUIRED),
        ];

        for (field, message) in cases {
            let mut blank = base.clone();
            blank[field] = json!("   ");
            assert_validation(service.register(&blank.to_string(), None).await, message);

            let mut absent = base.clone();
            absent.as_object_mut().unwrap().remove(field);
            assert_validation(service.register(&absent.to_string(), None).await, message);
        }

        assert_eq!(service.count().await.unwrap().count, 0);
    }

    #[actix_web::test]
    async fn test_register_invalid_email_and_gender() {
        let service = service();

        assert_validation(
            service.register(&payload("A", "not-an-email", "1"), None).await,
            "Doctor email must be a valid email address.",
        );

        let mut body = serde_json::from_str::<serde_json::Value>(&payload("A", "a@x.com", "1")).unwrap();
        body["gender"] = json!("robot");
        assert_validation(
            service.register(&body.to_string(), None).await,
            "Invalid gender provided. Allowed values: MALE, FEMALE, OTHER.",
        );
    }

    #[actix_web::test]
    async fn test_register_malformed_json() {
        let err = service().register("{oops", None).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::OperationError(msg) if msg.starts_with("Error registering doctor: ")
        ));
    }

    #[actix_web::test]
    async fn test_register_trims_fields_and_hashes_password() {
        let repo = Arc::new(InMemoryDoctorRepository::new());
        let service = DoctorService::new(repo.clone(), Arc::new(BcryptPasswordHasher::new(4)));

        service
            .register(&payload("  A  ", " a@x.com ", " 1 "), Some(Vec::new()))
            .await
            .unwrap();

        let stored = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.name, "A");
        assert_eq!(stored.phone, "1");
        assert_ne!(stored.password_hash, "p");
        assert!(bcrypt::verify("p", &stored.password_hash).unwrap());
        // 빈 이미지는 이미지 없음
        assert!(stored.doctor_image.is_none());
    }

    #[actix_web::test]
    async fn test_list_all_empty_is_not_found() {
        let err = service().list_all(0, 10).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "No doctors found in the system."));
    }

    #[actix_web::test]
    async fn test_list_all_pages() {
        let service = service();
        for i in 0..3 {
            register(&service, &format!("{}@x.com", i), &i.to_string()).await;
        }

        let page = service.list_all(0, 2).await.unwrap();
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].email, "2@x.com");

        let second = service.list_all(1, 2).await.unwrap();
        assert_eq!(second.current_page, 1);
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].email, "0@x.com");

        assert!(matches!(service.list_all(5, 2).await, Err(AppError::NotFound(_))));
        assert_validation(service.list_all(0, 0).await, "Page size must not be less than one.");
        assert_validation(service.list_all(u64::MAX, 2).await, "Page number is too large.");
    }

    #[actix_web::test]
    async fn test_single_lookups() {
        let service = service();
        let created = register(&service, "a@x.com", "1").await;

        assert_eq!(service.get_by_id(&created.id).await.unwrap().email, "a@x.com");
        assert_eq!(service.get_by_email("a@x.com").await.unwrap().id, created.id);
        assert_eq!(service.get_by_phone("1").await.unwrap().id, created.id);

        let missing = ObjectId::new().to_hex();
        assert!(matches!(
            service.get_by_id(&missing).await,
            Err(AppError::NotFound(msg)) if msg == format!("Doctor with ID {} not found.", missing)
        ));
        assert!(matches!(
            service.get_by_email("b@x.com").await,
            Err(AppError::NotFound(msg)) if msg == "Doctor with email b@x.com not found."
        ));
        assert!(matches!(
            service.get_by_phone("9").await,
            Err(AppError::NotFound(msg)) if msg == "Doctor with phone 9 not found."
        ));
        assert_validation(service.get_by_id("abc").await, "Invalid doctor ID format: abc");
    }

    #[actix_web::test]
    async fn test_multi_lookups() {
        let service = service();
        register(&service, "a@x.com", "1").await;
        register(&service, "b@x.com", "2").await;

        assert_eq!(service.get_by_name("Dr. Test").await.unwrap().len(), 2);
        assert_eq!(service.get_by_gender("male").await.unwrap().len(), 2);
        assert_eq!(service.get_by_specialization("s").await.unwrap().len(), 2);
        assert_eq!(service.get_by_status("Active").await.unwrap().len(), 2);

        assert!(matches!(
            service.get_by_name("Nobody").await,
            Err(AppError::NotFound(msg)) if msg == "No doctors found with name: Nobody"
        ));
        assert!(matches!(
            service.get_by_gender("female").await,
            Err(AppError::NotFound(msg)) if msg == "No doctors found with gender: FEMALE"
        ));
        assert!(matches!(
            service.get_by_status("inactive").await,
            Err(AppError::NotFound(msg)) if msg == "No doctors found with status: INACTIVE"
        ));
        assert_validation(
            service.get_by_status("retired").await,
            "Invalid status provided. Allowed values: ACTIVE, INACTIVE.",
        );
        assert_validation(
            service.get_by_gender("x").await,
            "Invalid gender provided. Allowed values: MALE, FEMALE, OTHER.",
        );
    }

    #[actix_web::test]
    async fn test_list_specializations() {
        let service = service();
        assert!(service.list_specializations().await.unwrap().is_empty());

        register(&service, "a@x.com", "1").await;
        assert_eq!(service.list_specializations().await.unwrap(), vec!["s".to_string()]);
    }

    #[actix_web::test]
    async fn test_update_status() {
        let service = service();
        let created = register(&service, "a@x.com", "1").await;

        let updated_at = |doctor: &DoctorResponse| {
            chrono::DateTime::parse_from_rfc3339(&doctor.updated_at).unwrap()
        };
        let pause = || actix_web::rt::time::sleep(std::time::Duration::from_millis(5));

        pause().await;
        let same = service.update_status(&created.id, Some("active")).await.unwrap();
        assert_eq!(same.message, "Doctor status is already ACTIVE.");
        let unchanged = service.get_by_id(&created.id).await.unwrap();
        assert_eq!(unchanged.updated_at, created.updated_at);

        pause().await;
        let changed = service.update_status(&created.id, Some("InActive")).await.unwrap();
        assert_eq!(changed.message, "Doctor status updated successfully to INACTIVE.");
        let stored = service.get_by_id(&created.id).await.unwrap();
        assert_eq!(stored.status, DoctorStatus::Inactive);
        assert!(updated_at(&stored) > updated_at(&created));
        assert_eq!(stored.created_at, created.created_at);
        assert_eq!(stored.name, created.name);
        assert_eq!(stored.email, created.email);

        assert_validation(
            service.update_status(&created.id, Some("paused")).await,
            "Invalid status provided. Allowed values: ACTIVE, INACTIVE.",
        );
        assert_validation(
            service.update_status(&created.id, Some("  ")).await,
            "Status cannot be empty.",
        );
        assert_validation(service.update_status(&created.id, None).await, "Status cannot be empty.");

        let missing = ObjectId::new().to_hex();
        assert_validation(
            service.update_status(&missing, Some("ACTIVE")).await,
            &format!("Doctor with ID {} not found.", missing),
        );
    }

    #[actix_web::test]
    async fn test_update_own_email_and_phone_succeeds() {
        let service = service();
        let created = register(&service, "a@x.com", "1").await;

        let mut request = update_request(&created);
        request.name = Some("Renamed".to_string());

        let result = service.update(&created.id, request).await.unwrap();
        assert_eq!(result.message, "Doctor updated successfully.");

        let updated = service.get_by_id(&created.id).await.unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, "a@x.com");
        assert_eq!(updated.status, DoctorStatus::Active);
    }

    #[actix_web::test]
    async fn test_update_conflicts() {
        let service = service();
        let first = register(&service, "a@x.com", "1").await;
        let second = register(&service, "b@x.com", "2").await;

        let mut request = update_request(&second);
        request.email = Some(first.email.clone());
        assert!(matches!(
            service.update(&second.id, request).await,
            Err(AppError::ConflictError(msg)) if msg == DUPLICATE_EMAIL
        ));

        let mut request = update_request(&second);
        request.phone = Some(first.phone.clone());
        assert!(matches!(
            service.update(&second.id, request).await,
            Err(AppError::ConflictError(msg)) if msg == DUPLICATE_PHONE
        ));
    }

    #[actix_web::test]
    async fn test_update_fields_image_and_password() {
        let repo = Arc::new(InMemoryDoctorRepository::new());
        let service = DoctorService::new(repo.clone(), Arc::new(BcryptPasswordHasher::new(4)));
        let created = register(&service, "a@x.com", "1").await;
        let id = parse_doctor_id(&created.id).unwrap();
        let original_hash = repo.find_by_id(&id).await.unwrap().unwrap().password_hash;

        let mut request = update_request(&created);
        request.status = Some("inactive".to_string());
        request.doctor_image = Some(STANDARD.encode(b"new-image"));
        request.password = Some("changed".to_string());
        request.dob = chrono::NaiveDate::from_ymd_opt(1990, 1, 2);
        service.update(&created.id, request).await.unwrap();

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status, DoctorStatus::Inactive);
        assert_eq!(stored.image_bytes(), Some(&b"new-image"[..]));
        assert_ne!(stored.password_hash, original_hash);
        assert!(bcrypt::verify("changed", &stored.password_hash).unwrap());
        assert_eq!(stored.dob, chrono::NaiveDate::from_ymd_opt(1990, 1, 2));

        // 이미지와 비밀번호를 생략하면 기존 값 유지
        let mut request = update_request(&DoctorResponse::from(stored.clone()));
        request.password = Some("   ".to_string());
        service.update(&created.id, request).await.unwrap();

        let kept = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(kept.image_bytes(), Some(&b"new-image"[..]));
        assert_eq!(kept.password_hash, stored.password_hash);
        assert_eq!(kept.status, DoctorStatus::Inactive);
    }

    #[actix_web::test]
    async fn test_update_validation() {
        let service = service();
        let created = register(&service, "a@x.com", "1").await;

        let mut request = update_request(&created);
        request.name = None;
        assert_validation(service.update(&created.id, request).await, NAME_REQUIRED);

        let mut request = update_request(&created);
        request.doctor_image = Some("%%%".to_string());
        assert_validation(
            service.update(&created.id, request).await,
            "Doctor image must be valid base64 data.",
        );

        let missing = ObjectId::new().to_hex();
        assert_validation(
            service.update(&missing, update_request(&created)).await,
            &format!("Doctor with ID {} not found.", missing),
        );
    }

    #[actix_web::test]
    async fn test_delete_by_id() {
        let service = service();
        let created = register(&service, "a@x.com", "1").await;

        let deleted = service.delete_by_id(&created.id).await.unwrap();
        assert_eq!(deleted.message, "Doctor deleted successfully.");
        assert!(matches!(service.get_by_id(&created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete_by_id(&created.id).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_authenticate() {
        let service = service();
        let created = register(&service, "a@x.com", "1").await;

        let doctor = service.authenticate("a@x.com", "p").await.unwrap();
        assert_eq!(doctor.id_string().unwrap(), created.id);

        assert!(matches!(
            service.authenticate("a@x.com", "wrong").await,
            Err(AppError::AuthenticationError(msg)) if msg == INVALID_CREDENTIALS
        ));
        assert!(matches!(
            service.authenticate("nobody@x.com", "p").await,
            Err(AppError::AuthenticationError(msg)) if msg == INVALID_CREDENTIALS
        ));

        service.update_status(&created.id, Some("INACTIVE")).await.unwrap();
        assert!(matches!(
            service.authenticate("a@x.com", "p").await,
            Err(AppError::AuthenticationError(msg)) if msg == "Doctor account is inactive."
        ));
    }

    /// 모든 호출이 저장소 오류를 내는 리포지토리
    struct FailingRepository;

    #[async_trait]
    impl DoctorRepository for FailingRepository {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn find_by_id(&self, _: &ObjectId) -> AppResult<Option<Doctor>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn find_by_email(&self, _: &str) -> AppResult<Option<Doctor>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn find_by_phone(&self, _: &str) -> AppResult<Option<Doctor>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn find_by_name(&self, _: &str) -> AppResult<Vec<Doctor>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn find_by_gender(&self, _: Gender) -> AppResult<Vec<Doctor>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn find_by_specialization(&self, _: &str) -> AppResult<Vec<Doctor>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn find_by_status(&self, _: DoctorStatus) -> AppResult<Vec<Doctor>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn find_page(&self, _: u64, _: u64) -> AppResult<Vec<Doctor>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn find_specializations(&self) -> AppResult<Vec<String>> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn save(&self, _: Doctor) -> AppResult<Doctor> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn delete_by_id(&self, _: &ObjectId) -> AppResult<bool> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
        async fn count(&self) -> AppResult<u64> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
    }

    #[actix_web::test]
    async fn test_storage_failures_carry_operation_context() {
        let service = DoctorService::new(
            Arc::new(FailingRepository),
            Arc::new(BcryptPasswordHasher::new(4)),
        );
        let id = ObjectId::new().to_hex();

        let assert_context = |result: AppError, context: &str| match result {
            AppError::OperationError(msg) => {
                assert_eq!(msg, format!("{}: connection refused", context))
            }
            other => panic!("expected operation error, got {:?}", other),
        };

        assert_context(service.list_all(0, 10).await.unwrap_err(), "Error retrieving doctors");
        assert_context(service.get_by_id(&id).await.unwrap_err(), "Error retrieving doctor");
        assert_context(
            service.register(&payload("A", "a@x.com", "1"), None).await.unwrap_err(),
            "Error registering doctor",
        );
        assert_context(
            service.update_status(&id, Some("ACTIVE")).await.unwrap_err(),
            "Error updating doctor status",
        );
        assert_context(service.delete_by_id(&id).await.unwrap_err(), "Error deleting doctor");
    }
}
