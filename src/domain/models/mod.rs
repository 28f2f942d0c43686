//! # Domain Models Module
//!
//! 저장되지 않는 값 객체를 모아 둔 모듈입니다.
//!
//! ## Entities vs Models 구분
//!
//! - `../entities/`: MongoDB 문서로 저장되는 객체 (`Doctor`)
//! - `./`: 요청 처리 중에만 존재하는 값 (`AuthenticatedUser`, `TokenClaims`)
//!
//! ```text
//! models/
//! ├── auth/   - 인증된 호출자, 요구 역할
//! └── token/  - JWT 클레임, 발급 토큰
//! ```

pub mod auth;
pub mod token;
