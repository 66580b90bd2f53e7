//! Search criteria for badge queries.

use serde::{Deserialize, Serialize};

/// Optional predicates combined with AND across categories.
///
/// Empty strings count as "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Exact match on issuer name OR issuer URL.
    #[serde(default)]
    pub issuer: Option<String>,
    /// Exact match on credential provider.
    #[serde(default)]
    pub provider: Option<String>,
    /// Case-insensitive substring of name, description, or issuer name.
    #[serde(default)]
    pub search: Option<String>,
}

impl SearchCriteria {
    /// Issuer filter, if set.
    pub fn issuer(&self) -> Option<&str> {
        non_empty(&self.issuer)
    }

    /// Provider filter, if set.
    pub fn provider(&self) -> Option<&str> {
        non_empty(&self.provider)
    }

    /// Free-text term, if set.
    pub fn term(&self) -> Option<&str> {
        non_empty(&self.search)
    }

    /// Whether no filter applies.
    pub fn is_empty(&self) -> bool {
        self.issuer().is_none() && self.provider().is_none() && self.term().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
