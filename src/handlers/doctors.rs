//! # Doctor Management HTTP Handlers
//!
//! 관리자 콘솔이 호출하는 `/admin` 엔드포인트입니다.
//! 모든 핸들러는 [`DoctorService`]를 `web::Data`로 받아 호출만 하고,
//! 에러는 `AppError`의 `ResponseError` 구현이 JSON 응답으로 변환합니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/admin/register-doctor` | multipart 등록 (`doctor`, `image`) | 201 |
//! | `GET` | `/admin/AllDoctors?page=&size=` | 페이지 목록 | 200 |
//! | `GET` | `/admin/ByDoctorId/{id}` | ID 조회 | 200 |
//! | `GET` | `/admin/ByDoctorName/{name}` | 이름 조회 | 200 |
//! | `GET` | `/admin/ByDoctorEmail/{email}` | 이메일 조회 | 200 |
//! | `GET` | `/admin/ByDoctorPhone/{phone}` | 전화번호 조회 | 200 |
//! | `GET` | `/admin/ByDoctorGender/{gender}` | 성별 조회 | 200 |
//! | `GET` | `/admin/ByDoctorSpecialization/{s}` | 전문 분야 조회 | 200 |
//! | `GET` | `/admin/ByDoctorStatus/{status}` | 상태 조회 | 200 |
//! | `GET` | `/admin/DoctorsAllSpecializations` | 전문 분야 목록 | 200 |
//! | `PUT` | `/admin/UpdateDoctorStatus/{id}?status=` | 상태 변경 | 200 |
//! | `PUT` | `/admin/updateDoctor/{id}` | 정보 수정 (JSON) | 200 |
//! | `DELETE` | `/admin/deleteDoctor/{id}` | 삭제 | 200 |
//! | `GET` | `/admin/doctor-count` | 전체 수 | 200 |

use actix_multipart::{Field, Multipart};
use actix_web::{delete, get, post, put, web, HttpResponse};
use futures_util::TryStreamExt;
use serde::Deserialize;
use crate::config::{PaginationConfig, UploadConfig};
use crate::core::errors::AppError;
use crate::domain::dto::UpdateDoctorRequest;
use crate::services::doctors::DoctorService;

/// `AllDoctors` 페이지 쿼리
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

/// `UpdateDoctorStatus` 쿼리
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// multipart 등록 요청에서 꺼낸 두 파트
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub doctor: Option<String>,
    pub image: Option<Vec<u8>>,
}

#[post("/register-doctor")]
pub async fn register_doctor(
    service: web::Data<DoctorService>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_registration_form(payload, UploadLimits::from_env()).await?;

    let doctor = form.doctor.ok_or_else(|| {
        AppError::ValidationError("Doctor details are required.".to_string())
    })?;

    let response = service.register(&doctor, form.image).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/AllDoctors")]
pub async fn get_all_doctors(
    service: web::Data<DoctorService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.unwrap_or(0);
    let size = query.size.unwrap_or_else(PaginationConfig::default_page_size);

    let doctors = service.list_all(page, size).await?;

    Ok(HttpResponse::Ok().json(doctors))
}

#[get("/ByDoctorId/{id}")]
pub async fn get_doctor_by_id(
    service: web::Data<DoctorService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let doctor = service.get_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(doctor))
}

#[get("/ByDoctorName/{name}")]
pub async fn get_doctors_by_name(
    service: web::Data<DoctorService>,
    name: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let doctors = service.get_by_name(&name).await?;
    Ok(HttpResponse::Ok().json(doctors))
}

#[get("/ByDoctorEmail/{email}")]
pub async fn get_doctor_by_email(
    service: web::Data<DoctorService>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let doctor = service.get_by_email(&email).await?;
    Ok(HttpResponse::Ok().json(doctor))
}

#[get("/ByDoctorPhone/{phone}")]
pub async fn get_doctor_by_phone(
    service: web::Data<DoctorService>,
    phone: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let doctor = service.get_by_phone(&phone).await?;
    Ok(HttpResponse::Ok().json(doctor))
}

#[get("/ByDoctorGender/{gender}")]
pub async fn get_doctors_by_gender(
    service: web::Data<DoctorService>,
    gender: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let doctors = service.get_by_gender(&gender).await?;
    Ok(HttpResponse::Ok().json(doctors))
}

#[get("/ByDoctorSpecialization/{specialization}")]
pub async fn get_doctors_by_specialization(
    service: web::Data<DoctorService>,
    specialization: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let doctors = service.get_by_specialization(&specialization).await?;
    Ok(HttpResponse::Ok().json(doctors))
}

#[get("/ByDoctorStatus/{status}")]
pub async fn get_doctors_by_status(
    service: web::Data<DoctorService>,
    status: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let doctors = service.get_by_status(&status).await?;
    Ok(HttpResponse::Ok().json(doctors))
}

#[get("/DoctorsAllSpecializations")]
pub async fn get_all_specializations(
    service: web::Data<DoctorService>,
) -> Result<HttpResponse, AppError> {
    let specializations = service.list_specializations().await?;
    Ok(HttpResponse::Ok().json(specializations))
}

#[put("/UpdateDoctorStatus/{id}")]
pub async fn update_doctor_status(
    service: web::Data<DoctorService>,
    id: web::Path<String>,
    query: web::Query<StatusQuery>,
) -> Result<HttpResponse, AppError> {
    let response = service.update_status(&id, query.status.as_deref()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/updateDoctor/{id}")]
pub async fn update_doctor(
    service: web::Data<DoctorService>,
    id: web::Path<String>,
    payload: web::Json<UpdateDoctorRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.update(&id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/deleteDoctor/{id}")]
pub async fn delete_doctor(
    service: web::Data<DoctorService>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = service.delete_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/doctor-count")]
pub async fn get_doctor_count(
    service: web::Data<DoctorService>,
) -> Result<HttpResponse, AppError> {
    let count = service.count().await?;
    Ok(HttpResponse::Ok().json(count))
}

/// multipart 파트별 크기 제한 (바이트)
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    /// `doctor` JSON 파트, 그리고 알 수 없는 파트들의 합계
    pub doctor_bytes: usize,
    pub image_bytes: usize,
}

impl UploadLimits {
    pub fn from_env() -> Self {
        Self {
            doctor_bytes: UploadConfig::max_doctor_bytes(),
            image_bytes: UploadConfig::max_image_bytes(),
        }
    }
}

/// 등록 multipart 본문을 읽습니다.
///
/// - `doctor`: JSON 텍스트 (UTF-8), `doctor_bytes` 이하
/// - `image`: 이미지 바이트, `image_bytes` 이하
///
/// 그 밖의 파트는 버퍼에 담지 않고 흘려보내며, 합계가 `doctor_bytes`를 넘으면 거부합니다.
/// 빈 `image` 파트는 이미지 없음으로 취급합니다.
pub async fn read_registration_form(
    mut payload: Multipart,
    limits: UploadLimits,
) -> Result<RegistrationForm, AppError> {
    let mut form = RegistrationForm::default();
    let mut discarded = 0;

    while let Some(field) = payload.try_next().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "doctor" => {
                let bytes = read_field(field, limits.doctor_bytes, "Doctor details").await?;
                let text = String::from_utf8(bytes).map_err(|_| {
                    AppError::ValidationError("Doctor details must be UTF-8 text.".to_string())
                })?;
                form.doctor = Some(text);
            }
            "image" => {
                let bytes = read_field(field, limits.image_bytes, "Doctor image").await?;
                form.image = Some(bytes).filter(|bytes| !bytes.is_empty());
            }
            _ => {
                discarded = discard_field(field, discarded, limits.doctor_bytes).await?;
            }
        }
    }

    Ok(form)
}

async fn read_field(mut field: Field, limit: usize, label: &str) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();

    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > limit {
            return Err(AppError::ValidationError(format!(
                "{} must not exceed {} bytes.",
                label, limit
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

/// 파트를 끝까지 읽어 버리고 누적 크기를 돌려줍니다.
async fn discard_field(mut field: Field, mut consumed: usize, limit: usize) -> Result<usize, AppError> {
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        consumed += chunk.len();
        if consumed > limit {
            return Err(AppError::ValidationError(format!(
                "Unexpected form parts must not exceed {} bytes.",
                limit
            )));
        }
    }

    Ok(consumed)
}

fn multipart_error(error: actix_multipart::MultipartError) -> AppError {
    AppError::ValidationError(format!("Invalid multipart payload: {}", error))
}
