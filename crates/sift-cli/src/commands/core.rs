//! Shared utilities for commands
//!
//! - `load_config` - Resolve the column keyword config
//! - `load_statement` - Read a statement file into a raw table

use std::path::Path;

use anyhow::{Context, Result};
use sift_core::{import::read_path, ColumnConfig, RawTable};

/// Load column keywords from an explicit path, or the default location
pub fn load_config(config_path: Option<&Path>) -> Result<ColumnConfig> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            ColumnConfig::with_config_path(path.to_path_buf())
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        None => ColumnConfig::new().context("Failed to load column config"),
    }
}

/// Read a statement file (csv, tsv, txt, json)
pub fn load_statement(file: &Path) -> Result<RawTable> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }
    read_path(file).with_context(|| format!("Failed to read statement: {}", file.display()))
}
