//! # 라우트 구성
//!
//! | 스코프 | 인증 | 핸들러 |
//! |--------|------|--------|
//! | `/health` | 없음 | 헬스 체크 |
//! | `/auth` | 없음 | 의사 로그인 |
//! | `/doctor` | `doctor` 역할 | 본인 프로필 |
//! | `/admin` | `admin` 역할 | 의사 레코드 관리 |
//!
//! 추출자(JSON, 쿼리, 경로) 파싱 실패도 `{"error": ...}` 형태의 400 응답이 되도록
//! 추출자 설정을 함께 등록합니다.

use crate::config::Role;
use crate::core::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_doctor_routes(cfg);
    configure_admin_routes(cfg);
}

fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid JSON body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid query parameters: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid path parameters: {}", err)).into()
    }));
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::doctor_login)
    );
}

fn configure_doctor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/doctor")
            .wrap(AuthMiddleware::required_with_role(Role::Doctor))
            .service(handlers::auth::get_profile)
    );
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AuthMiddleware::required_with_role(Role::Admin))
            .service(handlers::doctors::register_doctor)
            .service(handlers::doctors::get_all_doctors)
            .service(handlers::doctors::get_doctor_by_id)
            .service(handlers::doctors::get_doctors_by_name)
            .service(handlers::doctors::get_doctor_by_email)
            .service(handlers::doctors::get_doctor_by_phone)
            .service(handlers::doctors::get_doctors_by_gender)
            .service(handlers::doctors::get_doctors_by_specialization)
            .service(handlers::doctors::get_doctors_by_status)
            .service(handlers::doctors::get_all_specializations)
            .service(handlers::doctors::update_doctor_status)
            .service(handlers::doctors::update_doctor)
            .service(handlers::doctors::delete_doctor)
            .service(handlers::doctors::get_doctor_count)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "doctor_record_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
