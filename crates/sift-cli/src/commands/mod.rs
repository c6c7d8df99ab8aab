//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config and statement loading)
//! - `columns` - Column role inspection
//! - `merchant` - Single-narration merchant extraction
//! - `normalize` - Statement normalization and export
//! - `summary` - Statement summary report

pub mod columns;
pub mod core;
pub mod merchant;
pub mod normalize;
pub mod summary;

// Re-export command functions for main.rs
pub use columns::*;
pub use self::core::*;
pub use merchant::*;
pub use normalize::*;
pub use summary::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
