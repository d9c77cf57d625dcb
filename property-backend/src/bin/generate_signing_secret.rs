use property_backend::utils::credential::{generate_signing_secret, CredentialCodec, CredentialConfig};
use uuid::Uuid;

fn main() {
    let secret = generate_signing_secret();

    // 生成した鍵で発行と検証ができることを確認
    let codec = match CredentialCodec::new(CredentialConfig {
        secret_key: secret.clone(),
        issuer: "property-backend".to_string(),
    }) {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let probe = Uuid::new_v4();
    let verified = codec
        .issue(probe)
        .and_then(|token| codec.verify(&token));

    match verified {
        Ok(account_id) if account_id == probe => {
            println!("\n=== Signing Secret Generated ===");
            println!("Secret: {}", secret);
            println!("\nTo use in .env file:");
            println!("JWT_SECRET={}", secret);
        }
        Ok(_) | Err(_) => {
            eprintln!("Error: generated secret failed the sign/verify check");
            std::process::exit(1);
        }
    }
}
