//! JWT 토큰 관리 서비스 구현
//!
//! HS256 액세스 토큰의 발급, 검증, Authorization 헤더 파싱을 담당합니다.
//! 관리자 토큰은 같은 `JWT_SECRET`을 공유하는 관리 서비스가 발급하고,
//! 이 서비스는 의사 로그인 토큰을 발급합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::models::token::{IssuedToken, TokenClaims};

/// JWT 토큰 서비스
///
/// 서명 키와 만료 시간을 보관합니다. 라우트에서는 `web::Data<TokenService>`로 공유됩니다.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// `JWT_SECRET`, `JWT_EXPIRATION_HOURS` 환경 변수로 생성합니다.
    pub fn from_env() -> Self {
        Self::new(JwtConfig::secret(), JwtConfig::expiration_hours())
    }

    /// 액세스 토큰 발급
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// let issued = token_service.generate_access_token(&doctor_id, Some(&email), &["doctor"])?;
    /// println!("Bearer {}", issued.access_token);
    /// ```
    pub fn generate_access_token(
        &self,
        subject: &str,
        email: Option<&str>,
        roles: &[&str],
    ) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours);

        let claims = TokenClaims {
            sub: subject.to_string(),
            email: email.map(str::to_string),
            roles: roles.iter().map(|role| role.to_string()).collect(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());

        let access_token = encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.expiration_hours * 3600,
        })
    }

    /// 서명과 만료 시간을 검증하고 클레임을 반환합니다.
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token has expired.".to_string())
                }
                _ => AppError::AuthenticationError("Invalid token.".to_string()),
            })
    }

    /// `Bearer <token>` 형식의 헤더에서 토큰 부분만 꺼냅니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError(
                "Invalid authorization header format.".to_string(),
            )),
        }
    }
}
