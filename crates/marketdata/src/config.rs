//! Client configuration.

use serde::{Deserialize, Serialize};

use marketdata_core::SymbolSuggestion;

/// How symbol suggestions are matched against the search prefix.
///
/// Matching semantics are ultimately the provider's; the non-default
/// policies narrow its answer client-side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolMatch {
    /// Keep whatever the source returns.
    #[default]
    Remote,
    /// Keep symbols that start with the prefix, comparing case-sensitively.
    Prefix,
    /// Keep symbols that start with the prefix, ignoring ASCII case.
    PrefixIgnoreCase,
}

impl SymbolMatch {
    /// Returns true if the suggestion is kept for `prefix`.
    #[must_use]
    pub fn accepts(&self, prefix: &str, suggestion: &SymbolSuggestion) -> bool {
        let symbol = suggestion.symbol.as_str();
        match self {
            Self::Remote => true,
            Self::Prefix => symbol.starts_with(prefix),
            Self::PrefixIgnoreCase => symbol
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
        }
    }
}

/// Settings for [`QuoteClient`](crate::QuoteClient).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Symbol search matching policy.
    pub symbol_match: SymbolMatch,
}

impl ClientConfig {
    /// Sets the symbol search matching policy.
    #[must_use]
    pub const fn with_symbol_match(mut self, symbol_match: SymbolMatch) -> Self {
        self.symbol_match = symbol_match;
        self
    }
}
