use std::fmt;

use serde::{Deserialize, Serialize};

/// Video or comment identifier ("aweme" id). Opaque decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AwemeId(String);

impl AwemeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AwemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AwemeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AwemeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
