//! # 인증 설정
//!
//! JWT 서명 키와 만료 시간, 그리고 토큰에 담기는 역할(Role)을 정의합니다.
//!
//! 관리자 토큰은 같은 `JWT_SECRET`을 공유하는 관리자 인증 서비스가 발급하고,
//! 의사 토큰은 이 서비스의 `/auth/doctor/login`이 발급합니다.

use std::env;

pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명 비밀 키
    ///
    /// 설정되지 않은 경우 경고 로그와 함께 개발용 기본값을 사용합니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 액세스 토큰 만료 시간 (시간 단위, 기본값 24)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|hours| *hours > 0)
            .unwrap_or(24)
    }
}

/// 토큰에 담기는 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 의사 레코드를 관리하는 관리자
    Admin,
    /// 로그인한 의사 본인
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_string() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Doctor.as_str(), "doctor");
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Doctor).unwrap();
        assert_eq!(json, "\"doctor\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_jwt_expiration_default() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 24);
        }
    }
}
