// property-backend/src/utils/approval_token.rs

//! 管理者承認用の一回限りトークン
//!
//! 平文トークンはメールリンクにのみ載せ、DBにはSHA-256ハッシュを保存する。

use rand::RngCore;
use sha2::{Digest, Sha256};

const TOKEN_BYTES: usize = 32;

/// 新しい承認トークン（平文）を生成
pub fn generate_approval_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// 保存・検索用のハッシュ
pub fn hash_approval_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
