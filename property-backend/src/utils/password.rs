// property-backend/src/utils/password.rs

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// パスワード関連のエラー
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingError(#[from] argon2::password_hash::Error),

    #[error("Argon2 parameter error: {0}")]
    Argon2Error(#[from] argon2::Error),

    #[error("Weak password: {0}")]
    WeakPassword(String),
}

/// パスワード強度要件
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub require_letter: bool,
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 10,
            max_length: 128,
            require_letter: true,
            require_digit: true,
        }
    }
}

/// Argon2 設定
#[derive(Debug, Clone)]
pub struct Argon2Config {
    /// メモリコスト（KB）
    pub memory_cost: u32,
    /// 時間コスト（反復回数）
    pub time_cost: u32,
    /// 並列度
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: 19456, // 19MB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl Argon2Config {
    /// テスト用の軽量設定
    pub fn for_testing() -> Self {
        Self {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }
}

/// パスワードハッシュマネージャー
pub struct PasswordManager {
    argon2: Argon2<'static>,
    policy: PasswordPolicy,
}

impl PasswordManager {
    pub fn new(argon2_config: Argon2Config, policy: PasswordPolicy) -> Result<Self, PasswordError> {
        let params = argon2::Params::new(
            argon2_config.memory_cost,
            argon2_config.time_cost,
            argon2_config.parallelism,
            None,
        )?;

        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

        Ok(Self { argon2, policy })
    }

    /// パスワードをハッシュ化（強度チェック込み）
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.validate_password_strength(password)?;

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self.argon2.hash_password(password.as_bytes(), &salt)?;

        Ok(password_hash.to_string())
    }

    /// パスワードを検証
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::HashingError(e)),
        }
    }

    /// パスワード強度をチェック
    pub fn validate_password_strength(&self, password: &str) -> Result<(), PasswordError> {
        let mut errors = Vec::new();
        let length = password.chars().count();

        if length < self.policy.min_length {
            errors.push(format!(
                "Password must be at least {} characters long",
                self.policy.min_length
            ));
        }

        if length > self.policy.max_length {
            errors.push(format!(
                "Password must be no more than {} characters long",
                self.policy.max_length
            ));
        }

        if self.policy.require_letter && !password.chars().any(char::is_alphabetic) {
            errors.push("Password must contain at least one letter".to_string());
        }

        if self.policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("Password must contain at least one digit".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PasswordError::WeakPassword(errors.join("; ")))
        }
    }
}
