//! # HTTP Handlers
//!
//! 요청 추출(JSON, 쿼리, 경로, multipart)과 서비스 호출만 담당합니다.
//! 비즈니스 규칙은 `services` 계층에 있습니다.
//!
//! - [`doctors`] - 관리자용 의사 레코드 CRUD
//! - [`auth`] - 의사 로그인, 본인 프로필

pub mod doctors;
pub mod auth;
