use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::records::MatcherKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid matcher regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Unsupported regex flag '{0}'. Supported flags are i, m, s, x and U")]
    UnsupportedRegexFlag(char),
}

/// Configuration for a single entry in a strategy chain. The `type` tag and parameter names follow
/// the JSON the operator writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MatcherConfig {
    StructuredReference,
    #[serde(rename_all = "camelCase")]
    InvoiceNumber {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex_flags: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    InvoiceNumberWindow {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regex_flags: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offset: Option<usize>,
    },
    UniqueAmount,
}

impl MatcherConfig {
    /// The strategy this configuration entry instantiates.
    pub fn kind(&self) -> MatcherKind {
        match self {
            MatcherConfig::StructuredReference => MatcherKind::StructuredReference,
            MatcherConfig::InvoiceNumber { .. } => MatcherKind::InvoiceNumber,
            MatcherConfig::InvoiceNumberWindow { .. } => MatcherKind::InvoiceNumberWindow,
            MatcherConfig::UniqueAmount => MatcherKind::UniqueAmount,
        }
    }
}

/// Per-direction lists of counterpart names whose transactions are dropped at pull time, before
/// matching ever sees them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreConfig {
    #[serde(default)]
    pub withdrawals: IgnoreList,
    #[serde(default)]
    pub deposits: IgnoreList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreList {
    #[serde(default)]
    pub counterpart_names: Vec<String>,
}

impl IgnoreList {
    pub fn contains(&self, counterpart_name: &str) -> bool {
        self.counterpart_names.iter().any(|name| name == counterpart_name)
    }
}

/// The full matching configuration for one reconciliation run: one ordered strategy chain per
/// direction, plus the ignore lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationConfig {
    #[serde(default)]
    pub ignores: IgnoreConfig,
    pub withdrawal_matchers: Vec<MatcherConfig>,
    pub deposit_matchers: Vec<MatcherConfig>,
}

pub(crate) const DEFAULT_NUMBER_PATTERN: &str = ".+";
pub(crate) const DEFAULT_WINDOW_OFFSET: usize = 10;

/// Compiles an operator-supplied pattern, translating a perl-style flag string (e.g. `"im"`) into
/// an inline flag group. An invalid pattern or flag is a startup-time error, fatal before any
/// matching runs.
pub(crate) fn compile_pattern(pattern: Option<&str>, flags: Option<&str>) -> Result<Regex, ConfigError> {
    let pattern = pattern.unwrap_or(DEFAULT_NUMBER_PATTERN);
    let mut inline = String::new();
    for flag in flags.unwrap_or_default().chars() {
        match flag {
            'i' | 'm' | 's' | 'x' | 'U' => inline.push(flag),
            // "global" is implicit: candidate extraction walks every non-overlapping hit
            'g' => {},
            other => return Err(ConfigError::UnsupportedRegexFlag(other)),
        }
    }
    let full = if inline.is_empty() { pattern.to_string() } else { format!("(?{inline}){pattern}") };
    Regex::new(&full).map_err(|source| ConfigError::InvalidRegex { pattern: full, source })
}
