//! # 서비스 계층
//!
//! - [`doctors`] - 의사 레코드 비즈니스 규칙
//! - [`auth`] - JWT 토큰, 비밀번호 해싱

pub mod doctors;
pub mod auth;
