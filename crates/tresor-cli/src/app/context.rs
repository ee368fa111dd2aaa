//! Application context for the Tresor CLI.
//!
//! Bundles CLI arguments with the loaded config so handlers do not thread
//! paths and cipher settings through every call.

use std::path::PathBuf;

use tracing::debug;
use tresor_core::crypto::{CipherCodec, CipherScheme};
use tresor_core::storage::SqliteSecretStore;
use tresor_core::{SecretVault, TresorError};

use crate::cli::Cli;
use crate::config::{read_config, TresorConfig};
use crate::errors::CliError;

use super::resolver::{missing_store_message, resolve_config_path, resolve_store_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: Option<TresorConfig>,
}

impl<'a> AppContext<'a> {
    /// Build the context, reading the config file if one exists.
    pub fn load(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_path = resolve_config_path(cli)?;
        let config = if config_path.exists() {
            debug!(path = %config_path.display(), "loading config");
            Some(read_config(&config_path)?)
        } else {
            None
        };
        Ok(Self { cli, config })
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, self.config.as_ref())
    }

    /// Cipher for new secrets; decryption accepts every scheme regardless.
    pub fn cipher(&self) -> CipherScheme {
        self.config
            .as_ref()
            .map(|config| config.crypto.cipher)
            .unwrap_or_default()
    }

    pub fn vault(&self) -> SecretVault {
        SecretVault::new(CipherCodec::new(self.cipher()))
    }

    /// Open the existing store, turning a missing file into a hinted error.
    pub fn open_store(&self) -> anyhow::Result<SqliteSecretStore> {
        let path = self.store_path()?;
        match SqliteSecretStore::open(&path) {
            Ok(store) => Ok(store),
            Err(TresorError::NotFound(message)) => {
                Err(CliError::not_found(message, missing_store_message(&path)).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
