//! Merchant extraction from narration text
//!
//! UPI and bank narrations are semi-structured ("UPI-AMAZON-amazon@apl-REF-UPI",
//! "FT-REF789-AC001-John Doe - Salary", ...). The merchant is pulled out by an
//! ordered list of rules; the first rule that yields an acceptable candidate
//! wins. Rule order is data: reordering or adding a rule means editing
//! `default_rules`, not the control flow.

use std::sync::OnceLock;

use regex::Regex;

/// Display limit for merchant names
pub const MAX_MERCHANT_LEN: usize = 60;

/// How a rule's candidate is vetted before it is returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Acceptance {
    /// Non-empty, not purely numeric, longer than 2 chars, not the bare "UPI" token
    Meaningful,
    /// Any non-empty token
    AsIs,
}

impl Acceptance {
    fn accepts(&self, candidate: &str) -> bool {
        match self {
            Self::AsIs => !candidate.is_empty(),
            Self::Meaningful => {
                !candidate.is_empty()
                    && !candidate.chars().all(|c| c.is_ascii_digit())
                    && candidate.chars().count() > 2
                    && !candidate.eq_ignore_ascii_case("UPI")
            }
        }
    }
}

#[derive(Debug)]
enum Matcher {
    /// First match of `pattern`, capture group 1. Skipped entirely when
    /// `unless` matches the text.
    Capture {
        pattern: Regex,
        unless: Option<Regex>,
    },
    /// Segments of the text split on `separators`, in order
    Segments { separators: Regex },
}

#[derive(Debug)]
struct MerchantRule {
    name: &'static str,
    matcher: Matcher,
    acceptance: Acceptance,
}

impl MerchantRule {
    fn capture(name: &'static str, pattern: &str, acceptance: Acceptance) -> Self {
        Self {
            name,
            matcher: Matcher::Capture {
                pattern: Regex::new(pattern).expect("valid regex"),
                unless: None,
            },
            acceptance,
        }
    }

    fn unless(mut self, pattern: &str) -> Self {
        if let Matcher::Capture { unless, .. } = &mut self.matcher {
            *unless = Some(Regex::new(pattern).expect("valid regex"));
        }
        self
    }

    fn apply(&self, text: &str) -> Option<String> {
        match &self.matcher {
            Matcher::Capture { pattern, unless } => {
                if unless.as_ref().is_some_and(|re| re.is_match(text)) {
                    return None;
                }
                let candidate = pattern.captures(text)?.get(1)?.as_str().trim();
                self.acceptance
                    .accepts(candidate)
                    .then(|| candidate.to_string())
            }
            Matcher::Segments { separators } => separators
                .split(text)
                .map(str::trim)
                .find(|segment| self.acceptance.accepts(segment))
                .map(str::to_string),
        }
    }
}

fn default_rules() -> Vec<MerchantRule> {
    vec![
        // UPI-MERCHANT-handle@bank-REF-UPI, UPI/MERCHANT/...
        // Reversals ("REV-UPI-<ref>-<merchant>") belong to the next rule.
        MerchantRule::capture(
            "upi",
            r"(?i)UPI[-/]([^-@]+?)(?:-|@|\s|$)",
            Acceptance::Meaningful,
        )
        .unless(r"(?i)REV-UPI-"),
        // REV-UPI-REF-MERCHANT@bank-REF-UPI
        MerchantRule::capture(
            "upi-reversal",
            r"(?i)REV-UPI-[^-]+-([^-@]+?)(?:-|@|\s|$)",
            Acceptance::Meaningful,
        ),
        // FT-REF-ACCOUNT-MERCHANT - DESCRIPTION
        MerchantRule::capture(
            "fund-transfer",
            r"(?i)FT-[^-]+-[^-]+-\s*([^-]+?)(?:\s*-\s*[^-]*)?$",
            Acceptance::Meaningful,
        ),
        // ...@upi:merchant_handle
        MerchantRule::capture(
            "upi-handle",
            r"(?i)@upi[:\s]*([A-Za-z0-9._-]+)",
            Acceptance::AsIs,
        ),
        MerchantRule::capture(
            "to",
            r"(?i)to:?\s*([A-Za-z0-9 &._@-]{3,})",
            Acceptance::Meaningful,
        ),
        MerchantRule::capture(
            "from",
            r"(?i)from:?\s*([A-Za-z0-9 &._@-]{3,})",
            Acceptance::Meaningful,
        ),
        MerchantRule {
            name: "segment",
            matcher: Matcher::Segments {
                separators: Regex::new(r"[,|:-]").expect("valid regex"),
            },
            acceptance: Acceptance::Meaningful,
        },
    ]
}

/// Result of running the cascade, with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantMatch {
    pub merchant: String,
    /// Rule name, or "raw" when no rule applied and the text was truncated
    pub rule: &'static str,
}

/// Ordered rule cascade for merchant extraction
#[derive(Debug)]
pub struct MerchantExtractor {
    rules: Vec<MerchantRule>,
}

impl Default for MerchantExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MerchantExtractor {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Shared instance with compiled rules
    pub fn shared() -> &'static MerchantExtractor {
        static EXTRACTOR: OnceLock<MerchantExtractor> = OnceLock::new();
        EXTRACTOR.get_or_init(MerchantExtractor::new)
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Extract a merchant. Absent narration yields an empty string.
    pub fn extract(&self, narration: Option<&str>) -> String {
        match narration {
            Some(text) => self.explain(text).merchant,
            None => String::new(),
        }
    }

    /// Run the cascade and report which rule won
    pub fn explain(&self, text: &str) -> MerchantMatch {
        for rule in &self.rules {
            if let Some(candidate) = rule.apply(text) {
                return MerchantMatch {
                    merchant: truncate_chars(&candidate, MAX_MERCHANT_LEN),
                    rule: rule.name,
                };
            }
        }

        MerchantMatch {
            merchant: truncate_chars(text, MAX_MERCHANT_LEN),
            rule: "raw",
        }
    }
}

/// Extract a merchant with the shared default cascade
pub fn extract_merchant(narration: Option<&str>) -> String {
    MerchantExtractor::shared().extract(narration)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
