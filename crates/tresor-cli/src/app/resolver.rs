//! Path resolution for config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, TresorConfig};

/// Resolve the config file path (`--config` / TRESOR_CONFIG, then XDG default).
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match cli.config.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => default_config_path(),
    }
}

/// Resolve the store path (`--db` / TRESOR_DB, then config, then XDG default).
pub fn resolve_store_path(cli: &Cli, config: Option<&TresorConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.store.path));
    }
    default_store_path()
}

/// Hint shown when the store file is missing.
pub fn missing_store_message(path: &Path) -> String {
    format!(
        "No secret store found at {}\n\nRun:\n  tresor init\n\nOr specify a store path:\n  TRESOR_DB=/path/to/tresor.db tresor init",
        path.display()
    )
}
