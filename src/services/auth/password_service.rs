//! 비밀번호 해싱
//!
//! 의사 서비스는 [`PasswordHasher`] 트레이트에만 의존합니다.
//! 운영 구현은 bcrypt이며 비용(cost)은 환경별로 다릅니다.

use std::time::Instant;
use log::debug;
use crate::config::PasswordConfig;
use crate::core::errors::AppError;

/// 단방향 비밀번호 해셔
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, AppError>;

    /// 해시 형식이 잘못된 경우에도 `false`를 반환합니다.
    fn verify(&self, plain: &str, hash: &str) -> bool;
}

/// bcrypt 해셔
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// `BCRYPT_COST` 또는 실행 환경 기본값을 사용합니다.
    pub fn from_env() -> Self {
        Self::new(PasswordConfig::bcrypt_cost())
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, AppError> {
        let started = Instant::now();
        let hashed = bcrypt::hash(plain, self.cost)
            .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))?;

        debug!("bcrypt hash (cost {}) took {:?}", self.cost, started.elapsed());
        Ok(hashed)
    }

    fn verify(&self, plain: &str, hash: &str) -> bool {
        bcrypt::verify(plain, hash).unwrap_or(false)
    }
}
