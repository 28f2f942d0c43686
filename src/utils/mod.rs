//! 공통 유틸리티 모듈
//!
//! - [`string_utils`] - 요청 필드 검증/정리, serde 헬퍼
//! - [`display_terminal`] - 기동 과정 터미널 출력

pub mod string_utils;
pub mod display_terminal;
