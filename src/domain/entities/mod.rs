//! # 도메인 엔티티
//!
//! 저장소에 그대로 저장되는 영속 모델입니다.
//! 민감 정보(비밀번호 해시)를 포함하므로 HTTP 응답에는 항상 DTO로 변환하여 내보냅니다.

pub mod doctors;
