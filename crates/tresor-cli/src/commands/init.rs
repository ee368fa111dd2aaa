use tresor_core::storage::SqliteSecretStore;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, TresorConfig};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let cli = ctx.cli();
    let config_path = resolve_config_path(cli)?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}. Use --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let store_path = match args.path.as_deref().or(cli.db.as_deref()) {
        Some(path) => std::path::PathBuf::from(path),
        None => default_store_path()?,
    };
    let cipher = args.cipher.unwrap_or_default();

    // --force reopens an existing store instead of replacing it
    let reused = args.force && store_path.exists();
    if reused {
        SqliteSecretStore::open(&store_path)?;
    } else {
        SqliteSecretStore::create(&store_path)?;
    }
    write_config(&config_path, &TresorConfig::new(store_path.clone(), cipher))?;

    if !ctx.quiet() {
        if reused {
            println!("Using existing secret store at {}", store_path.display());
        } else {
            println!("Initialized secret store at {}", store_path.display());
        }
        println!("Config written to {} (cipher: {})", config_path.display(), cipher);
    }
    Ok(())
}
