//! 인증 관련 서비스
//!
//! - [`token_service`] - JWT 발급/검증
//! - [`password_service`] - 비밀번호 해싱

pub mod token_service;
pub mod password_service;

pub use token_service::*;
pub use password_service::*;
