//! JWT 액세스 토큰 클레임
//!
//! RFC 7519 표준 클레임과 역할 목록만 담습니다.
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (의사 또는 관리자 ID)
/// - `email`: 이메일 (선택사항)
/// - `roles`: 역할 목록 (`admin`, `doctor`)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

/// 발급된 액세스 토큰
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub access_token: String,
    /// 만료까지 남은 시간 (초)
    pub expires_in: i64,
}
