use secrecy::ExposeSecret;
use tresor_core::crypto::validate_password;
use tresor_core::SecretStore;

use crate::app::AppContext;
use crate::cli::{AddArgs, DeleteArgs, ListArgs, ShowArgs};
use crate::errors::CliError;
use crate::helpers::{prompt_new_password, prompt_password, read_content};
use crate::output::{print_secret, print_secret_list, secret_json, secrets_json};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let content = read_content(args.content.clone())?;
    let password = prompt_new_password()?;
    validate_password(password.expose_secret()).map_err(CliError::from)?;

    let sealed = ctx
        .vault()
        .seal(args.user, &password, content.as_str())
        .map_err(CliError::from)?;
    let secret = store.insert(&sealed)?;

    if !ctx.quiet() {
        println!("Added secret {}", secret.id());
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let secrets = store.list_for_user(args.user)?;

    let mut contents = Vec::new();
    if args.reveal && !secrets.is_empty() {
        let password = prompt_password()?;
        let vault = ctx.vault();
        for secret in &secrets {
            contents.push(vault.open(secret, &password).map_err(CliError::from)?);
        }
    }
    let revealed: Vec<Option<&str>> = (0..secrets.len())
        .map(|i| contents.get(i).map(|content| content.as_str()))
        .collect();

    if args.json {
        let output = serde_json::to_string_pretty(&secrets_json(&secrets, &revealed))?;
        println!("{}", output);
    } else {
        print_secret_list(&secrets, &revealed, ctx.quiet());
    }
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let secret = store.get(args.id)?.ok_or_else(|| {
        CliError::not_found(
            format!("Secret {} not found", args.id),
            "Hint: Use `tresor list --user <ID>` to see available secrets.",
        )
    })?;

    let password = prompt_password()?;
    let content = ctx
        .vault()
        .open(&secret, &password)
        .map_err(CliError::from)?;

    if args.json {
        let output = serde_json::to_string_pretty(&secret_json(&secret, Some(content.as_str())))?;
        println!("{}", output);
    } else {
        print_secret(&secret, content.as_str(), ctx.quiet());
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    if !store.delete(args.id)? {
        return Err(CliError::not_found(
            format!("Secret {} not found", args.id),
            "Hint: Use `tresor list --user <ID>` to see available secrets.",
        )
        .into());
    }

    if !ctx.quiet() {
        println!("Deleted secret {}", args.id);
    }
    Ok(())
}
