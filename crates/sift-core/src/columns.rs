//! Column role classification
//!
//! Statement exports name their columns differently per bank ("Txn Date",
//! "Value Date", "Narration", "Withdrawal Amt.", ...). Roles are detected by
//! case-insensitive keyword matching against the header names. The keyword
//! table is data: defaults live here and in `config/columns.toml`, overrides
//! come from the config layer.

use tracing::debug;

use crate::models::{ColumnRoles, Role};

/// Built-in keyword table, in role order
const DEFAULT_KEYWORDS: &[(Role, &[&str])] = &[
    (Role::Date, &["date", "txn date", "value date"]),
    (
        Role::Narration,
        &["narration", "description", "remarks", "particulars", "details"],
    ),
    (Role::Amount, &["amount", "amt"]),
    (Role::Debit, &["debit", "withdraw"]),
    (Role::Credit, &["credit", "deposit"]),
    (Role::Type, &["type", "dr/cr", "cr/dr"]),
];

/// Role → case-insensitive substring keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePatterns {
    entries: Vec<(Role, Vec<String>)>,
}

impl Default for RolePatterns {
    fn default() -> Self {
        Self {
            entries: DEFAULT_KEYWORDS
                .iter()
                .map(|(role, words)| (*role, words.iter().map(|w| w.to_string()).collect()))
                .collect(),
        }
    }
}

impl RolePatterns {
    /// Keywords currently registered for a role
    pub fn keywords(&self, role: Role) -> &[String] {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the keywords for a role. Keywords are stored lowercased.
    pub fn set_keywords(&mut self, role: Role, keywords: Vec<String>) {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        match self.entries.iter_mut().find(|(r, _)| *r == role) {
            Some(entry) => entry.1 = keywords,
            None => self.entries.push((role, keywords)),
        }
    }

    /// Does this column name look like it serves `role`?
    pub fn matches(&self, role: Role, column: &str) -> bool {
        let column = column.to_lowercase();
        self.keywords(role)
            .iter()
            .any(|keyword| column.contains(keyword.as_str()))
    }
}

/// Resolve column roles for one batch.
///
/// For each role the first column (original order) matching that role's
/// keywords wins. Roles are independent: the same column may serve several
/// roles. Missing roles are left unset; that is never an error.
pub fn classify_columns<S: AsRef<str>>(columns: &[S], patterns: &RolePatterns) -> ColumnRoles {
    let mut roles = ColumnRoles::new();

    for role in Role::all() {
        if let Some(column) = columns
            .iter()
            .map(|c| c.as_ref())
            .find(|c| patterns.matches(*role, c))
        {
            roles = roles.with(*role, column);
        }
    }

    debug!(
        date = ?roles.date(),
        narration = ?roles.narration(),
        amount = ?roles.amount(),
        debit = ?roles.debit(),
        credit = ?roles.credit(),
        kind = ?roles.kind(),
        "Resolved column roles"
    );

    roles
}
