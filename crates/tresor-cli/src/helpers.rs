//! Input helpers: password prompts and secret content.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::constants::PASSWORD_ENV;
use crate::errors::CliError;

fn password_from_env() -> Option<SecretString> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

/// Prompt for the password of existing secrets, or read it from TRESOR_PASSWORD.
pub fn prompt_password() -> anyhow::Result<SecretString> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            PASSWORD_ENV
        ))
        .into());
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Prompt for a new password with confirmation, or read it from TRESOR_PASSWORD.
pub fn prompt_new_password() -> anyhow::Result<SecretString> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            PASSWORD_ENV
        ))
        .into());
    }
    Password::new()
        .with_prompt("Enter password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map(SecretString::from)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Secret content from `--content`, or piped stdin.
pub fn read_content(content: Option<String>) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = content {
        return non_empty(Zeroizing::new(value));
    }
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(CliError::invalid_input(
            "No content provided. Use --content or pipe it on stdin.",
        )
        .into());
    }
    let mut buffer = Zeroizing::new(String::new());
    stdin
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    let trimmed_len = buffer.trim_end_matches(['\r', '\n']).len();
    buffer.truncate(trimmed_len);
    non_empty(buffer)
}

fn non_empty(value: Zeroizing<String>) -> anyhow::Result<Zeroizing<String>> {
    if value.is_empty() {
        return Err(CliError::invalid_input("Secret content cannot be empty").into());
    }
    Ok(value)
}
