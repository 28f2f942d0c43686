//! 의사 레코드 서비스 백엔드
//!
//! 의료 기관 관리자 콘솔이 사용하는 의사 레코드 CRUD 서비스입니다.
//! 등록 시 이메일/전화번호 유일성 검사, 필드별 검증 메시지, 페이지 목록,
//! 상태 변경을 제공하며 관리자 라우트는 JWT 역할 검사로 보호됩니다.
//!
//! # Features
//!
//! - **의사 레코드 관리**: multipart 등록(이미지 포함), 조회, 수정, 상태 변경, 삭제
//! - **JWT 인증**: 관리자/의사 역할 기반 접근 제어, 의사 로그인
//! - **MongoDB**: 유니크 인덱스로 동시 등록 경쟁 차단
//! - **메모리 저장소**: 로컬 실행과 테스트용
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /health, /auth, /doctor, /admin
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← JSON / 쿼리 / 경로 / multipart 추출
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← DoctorService, TokenService, PasswordHasher
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← Arc<dyn DoctorRepository>
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB/Memory  │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```bash
//! export STORAGE_BACKEND=memory
//! export JWT_SECRET=change-me
//! cargo run
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
