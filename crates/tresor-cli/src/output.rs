//! Output formatting for secrets (JSON and plain text).

use tresor_core::crypto::CipherScheme;
use tresor_core::Secret;

/// Convert a secret to JSON for output. `content` is only set when revealed.
pub fn secret_json(secret: &Secret, content: Option<&str>) -> serde_json::Value {
    let mut value = serde_json::json!({
        "id": secret.id(),
        "user_id": secret.user_id(),
        "created_at": secret.created_at(),
        "cipher": CipherScheme::detect(secret.ciphertext()).as_str(),
    });
    if let Some(content) = content {
        value["content"] = serde_json::Value::String(content.to_string());
    }
    value
}

/// Convert multiple secrets to a JSON array for output.
pub fn secrets_json(secrets: &[Secret], contents: &[Option<&str>]) -> Vec<serde_json::Value> {
    secrets
        .iter()
        .enumerate()
        .map(|(i, secret)| secret_json(secret, contents.get(i).copied().flatten()))
        .collect()
}

pub fn print_secret_list(secrets: &[Secret], contents: &[Option<&str>], quiet: bool) {
    if !quiet {
        println!("ID | CREATED_AT | CIPHER | CONTENT");
    }
    for (i, secret) in secrets.iter().enumerate() {
        let content = contents.get(i).copied().flatten().unwrap_or("[hidden]");
        println!(
            "{} | {} | {} | {}",
            secret.id(),
            secret.created_at().to_rfc3339(),
            CipherScheme::detect(secret.ciphertext()),
            content
        );
    }
}

pub fn print_secret(secret: &Secret, content: &str, quiet: bool) {
    if !quiet {
        println!("ID: {}", secret.id());
        println!("User: {}", secret.user_id());
        println!("Created: {}", secret.created_at().to_rfc3339());
        println!();
    }
    println!("{}", content);
}
