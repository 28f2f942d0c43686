//! # Domain Layer Module
//!
//! 의사 레코드 서비스의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - Doctor 엔티티, Gender/DoctorStatus
//! ├── dto       - 요청/응답 구조체, Page<T>
//! └── models    - 인증 호출자, JWT 클레임
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! 엔티티는 저장소 밖으로 그대로 나가지 않습니다.
//! 핸들러는 항상 [`dto::DoctorResponse`]로 변환된 값만 응답에 씁니다.

pub mod entities;
pub mod dto;
pub mod models;
