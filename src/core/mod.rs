//! # Core Module
//!
//! - [`errors`] - 애플리케이션 에러 타입과 HTTP 매핑
//! - [`registry`] - 기동 시 서비스 조립과 앱 데이터 등록

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
