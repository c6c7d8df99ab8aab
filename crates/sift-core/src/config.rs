//! Column-role keyword configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit override path, or the override in the data dir
//!    (~/.local/share/sift/config/columns.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Roles missing from an override keep their built-in keywords.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::columns::RolePatterns;
use crate::error::{Error, Result};
use crate::models::Role;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/columns.toml");

/// Loaded column configuration
#[derive(Debug, Clone)]
pub struct ColumnConfig {
    patterns: RolePatterns,
    config_path: Option<PathBuf>,
}

impl ColumnConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn new() -> Result<Self> {
        let path = default_config_path();
        let patterns = load_config(path.as_deref())?;
        Ok(Self {
            patterns,
            config_path: path,
        })
    }

    /// Load with an explicit override path
    pub fn with_config_path(path: PathBuf) -> Result<Self> {
        let patterns = load_config(Some(path.as_path()))?;
        Ok(Self {
            patterns,
            config_path: Some(path),
        })
    }

    /// Use explicit patterns (for testing)
    pub fn with_patterns(patterns: RolePatterns) -> Self {
        Self {
            patterns,
            config_path: None,
        }
    }

    pub fn patterns(&self) -> &RolePatterns {
        &self.patterns
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self::new().unwrap_or_else(|e| {
            warn!("Falling back to built-in column keywords: {}", e);
            Self::with_patterns(RolePatterns::default())
        })
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("sift").join("config").join("columns.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<RolePatterns> {
    let content = match override_path {
        Some(path) if path.exists() => {
            info!("Loading column config from {}", path.display());
            fs::read_to_string(path)
                .map_err(|e| Error::InvalidData(format!("Failed to read config: {}", e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    roles: Option<HashMap<String, RawRole>>,
}

#[derive(Debug, Deserialize)]
struct RawRole {
    keywords: Option<Vec<String>>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<RolePatterns> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid config TOML: {}", e)))?;

    let mut patterns = RolePatterns::default();

    if let Some(roles) = raw.roles {
        for (name, role_config) in roles {
            let role: Role = match name.parse() {
                Ok(role) => role,
                Err(_) => continue, // Skip unknown roles
            };
            if let Some(keywords) = role_config.keywords {
                patterns.set_keywords(role, keywords);
            }
        }
    }

    Ok(patterns)
}
