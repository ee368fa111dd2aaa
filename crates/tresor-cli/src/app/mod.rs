//! Application-level utilities for the Tresor CLI.
//!
//! This module provides:
//! - Path resolution for config and store files
//! - The per-invocation context (config, store, vault)

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::{missing_store_message, resolve_config_path, resolve_store_path};
