//! # Doctor Authentication Handlers
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/auth/doctor/login` | 없음 | 이메일/비밀번호 로그인, 액세스 토큰 발급 |
//! | `GET` | `/doctor/profile` | doctor | 토큰 주체의 레코드 조회 |
//!
//! 관리자 토큰은 같은 서명 키를 공유하는 관리 서비스가 발급하므로 여기에는 없습니다.

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;
use crate::config::Role;
use crate::core::errors::AppError;
use crate::domain::dto::{DoctorLoginRequest, DoctorLoginResponse, DoctorResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::TokenService;
use crate::services::doctors::DoctorService;
use crate::utils::string_utils::first_validation_message;

#[post("/doctor/login")]
pub async fn doctor_login(
    doctor_service: web::Data<DoctorService>,
    token_service: web::Data<TokenService>,
    payload: web::Json<DoctorLoginRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload.validate()
        .map_err(|e| AppError::ValidationError(first_validation_message(&e)))?;

    let doctor = doctor_service
        .authenticate(&payload.email, &payload.password)
        .await?;

    let doctor_id = doctor.id_string().ok_or_else(|| {
        AppError::InternalError("Stored doctor has no identifier".to_string())
    })?;

    let issued = token_service.generate_access_token(
        &doctor_id,
        Some(&doctor.email),
        &[Role::Doctor.as_str()],
    )?;

    log::info!("의사 로그인 성공: {} ({})", doctor.email, doctor_id);

    Ok(HttpResponse::Ok().json(DoctorLoginResponse {
        doctor: DoctorResponse::from(doctor),
        access_token: issued.access_token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    }))
}

/// 로그인한 의사 본인의 레코드
#[get("/profile")]
pub async fn get_profile(
    doctor_service: web::Data<DoctorService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let doctor = doctor_service.get_by_id(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(doctor))
}
