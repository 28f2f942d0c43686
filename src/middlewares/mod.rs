//! # 미들웨어
//!
//! - [`auth_middleware`] - JWT Bearer 토큰 검증과 역할 검사

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
