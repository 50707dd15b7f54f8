//! Quote identifier generation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PREFIX: &str = "QUOTE-";
const TOKEN_LEN: usize = 8;

/// Unique, human-readable identifier for one quote.
///
/// Shape: `QUOTE-` followed by 8 uppercase hex characters taken from a random
/// 128-bit identifier. Collisions are negligibly likely and are not checked
/// against the store. The same identifier is reused for the document filename,
/// the storage key and the email subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(String);

impl QuoteId {
    pub fn generate() -> Self {
        let token: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(TOKEN_LEN)
            .collect::<String>()
            .to_uppercase();
        Self(format!("{PREFIX}{token}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key of the generated document for this quote.
    pub fn document_key(&self) -> String {
        format!("{}.pdf", self.0)
    }

    /// Parse an identifier from its string form, verifying the shape.
    pub fn parse(value: &str) -> Option<Self> {
        let token = value.strip_prefix(PREFIX)?;
        if token.len() == TOKEN_LEN
            && token
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
