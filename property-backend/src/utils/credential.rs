// property-backend/src/utils/credential.rs

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use uuid::Uuid;

/// 資格情報の有効期間（発行から1時間）
pub const CREDENTIAL_TTL_SECONDS: i64 = 60 * 60;

const MIN_SECRET_LENGTH: usize = 32;

/// 資格情報の検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Credential signature does not match")]
    InvalidSignature,

    #[error("Credential has expired")]
    Expired,

    #[error("Credential could not be parsed: {0}")]
    Malformed(String),

    #[error("Failed to sign credential: {0}")]
    Signing(String),

    #[error("Invalid credential configuration: {0}")]
    Configuration(String),
}

/// 署名済み資格情報のペイロード
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CredentialClaims {
    /// Subject (account ID)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Token ID
    pub jti: String,
}

/// 資格情報の設定。起動時に一度だけ読み込み、以降は不変
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    pub secret_key: String,
    pub issuer: String,
}

impl CredentialConfig {
    /// 環境変数から設定を読み込み
    pub fn from_env() -> Result<Self, CredentialError> {
        let secret_key = env::var("JWT_SECRET")
            .or_else(|_| env::var("JWT_SECRET_KEY"))
            .map_err(|_| {
                CredentialError::Configuration("JWT_SECRET or JWT_SECRET_KEY must be set".into())
            })?;

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "property-backend".to_string());

        Ok(Self { secret_key, issuer })
    }

    /// 秘密鍵の検証
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.secret_key.len() < MIN_SECRET_LENGTH {
            return Err(CredentialError::Configuration(format!(
                "Signing secret must be at least {} characters",
                MIN_SECRET_LENGTH
            )));
        }
        Ok(())
    }
}

/// 資格情報の発行と検証
///
/// 検証は (トークン, 秘密鍵, 現在時刻) の純粋関数で、I/O を行わない。
pub struct CredentialCodec {
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl CredentialCodec {
    pub fn new(config: CredentialConfig) -> Result<Self, CredentialError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        // 期限は verify_at で注入された時刻と比較する
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp", "iss"]);
        validation.set_issuer(&[config.issuer.as_str()]);

        Ok(Self {
            issuer: config.issuer,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// 現在時刻で資格情報を発行
    pub fn issue(&self, account_id: Uuid) -> Result<String, CredentialError> {
        self.issue_at(account_id, Utc::now())
    }

    /// 指定時刻を発行時刻として資格情報を発行
    pub fn issue_at(&self, account_id: Uuid, now: DateTime<Utc>) -> Result<String, CredentialError> {
        let exp = now + Duration::seconds(CREDENTIAL_TTL_SECONDS);

        let claims = CredentialClaims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }

    /// 現在時刻で検証し、アカウントIDを返す
    pub fn verify(&self, token: &str) -> Result<Uuid, CredentialError> {
        self.verify_at(token, Utc::now())
    }

    /// 指定時刻で検証し、アカウントIDを返す
    ///
    /// 署名を先に検証するため、正しく署名された期限切れトークンは
    /// 必ず `Expired` になる。
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, CredentialError> {
        let claims = self.decode_claims(token)?;

        if now.timestamp() > claims.exp {
            return Err(CredentialError::Expired);
        }

        Uuid::parse_str(&claims.sub)
            .map_err(|_| CredentialError::Malformed("subject is not an account id".into()))
    }

    /// 署名を検証してクレームを取得（期限は見ない）
    pub fn decode_claims(&self, token: &str) -> Result<CredentialClaims, CredentialError> {
        decode::<CredentialClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    CredentialError::InvalidSignature
                }
                ErrorKind::InvalidIssuer => {
                    CredentialError::Malformed("credential was issued by another issuer".into())
                }
                _ => CredentialError::Malformed(e.to_string()),
            })
    }

    /// 資格情報の有効期間（秒）
    pub fn ttl_seconds(&self) -> i64 {
        CREDENTIAL_TTL_SECONDS
    }
}

/// ランダムな署名用秘密鍵を生成（64文字）
pub fn generate_signing_secret() -> String {
    use rand::RngCore;

    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
