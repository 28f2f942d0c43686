//! # 애플리케이션 에러 시스템
//!
//! 서비스 전역에서 사용하는 단일 에러 타입 [`AppError`]를 정의합니다.
//! `thiserror`로 메시지를 구성하고 `actix_web::ResponseError`를 구현하여
//! 핸들러가 `Result<HttpResponse, AppError>`만 반환하면 HTTP 응답으로 자동 변환됩니다.
//!
//! ## 에러 분류
//!
//! | 분류 | 변형 | HTTP |
//! |------|------|------|
//! | 입력 검증 실패 | `ValidationError` | 400 |
//! | 작업 실패 (예상치 못한 오류를 작업 문맥과 함께 감싼 것) | `OperationError` | 400 |
//! | 리소스 없음 | `NotFound` | 404 |
//! | 이메일/전화번호 중복 | `ConflictError` | 400 |
//! | 인증 실패 | `AuthenticationError` | 401 |
//! | 권한 부족 | `AuthorizationError` | 403 |
//! | 저장소/내부 오류 | `DatabaseError`, `InternalError` | 500 |
//!
//! 서비스 계층은 [`ErrorContext::context`]로 저장소/내부 오류를
//! `OperationError`로 감싸서 "Error registering doctor: ..." 형태의
//! 400 응답을 만듭니다. 도메인 에러(검증, 없음, 중복)는 그대로 통과합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult, ErrorContext};
//!
//! async fn delete(&self, id: &str) -> AppResult<MessageResponse> {
//!     self.delete_inner(id).await.context("Error deleting doctor")
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 작업 문맥이 붙은 예상치 못한 실패 (400 Bad Request)
    #[error("{0}")]
    OperationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 이메일/전화번호 중복 에러 (400 Bad Request)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 저장소 또는 내부 구현에서 발생한 에러인지 확인합니다.
    ///
    /// 이 두 종류만 [`ErrorContext`]에서 작업 문맥으로 감싸집니다.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, AppError::DatabaseError(_) | AppError::InternalError(_))
    }

    /// 변형 접두어 없이 원본 메시지만 반환합니다.
    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(msg)
            | AppError::ValidationError(msg)
            | AppError::OperationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::InternalError(msg) => msg,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_)
            | AppError::OperationError(_)
            | AppError::ConflictError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 본문은 항상 `{"error": "..."}` 형태의 JSON입니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 서비스 경계에서 저장소/내부 에러에 작업 문맥을 붙이는 확장 trait
pub trait ErrorContext<T> {
    /// 인프라 에러를 `OperationError("{msg}: {원인}")`로 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ErrorContext<T> for AppResult<T> {
    fn context(self, msg: &str) -> AppResult<T> {
        self.with_context(|| msg.to_string())
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            if e.is_infrastructure() {
                AppError::OperationError(format!("{}: {}", f(), e.message()))
            } else {
                e
            }
        })
    }
}
