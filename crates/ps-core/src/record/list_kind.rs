use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two collections a record can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Records produced by the generator, newest batch first.
    Generated,
    /// Records the user explicitly kept.
    Saved,
}

impl ListKind {
    pub const ALL: [ListKind; 2] = [ListKind::Generated, ListKind::Saved];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Generated => "generated",
            ListKind::Saved => "saved",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown list: {0}")]
pub struct ListKindParseError(pub String);

impl FromStr for ListKind {
    type Err = ListKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generated" => Ok(ListKind::Generated),
            "saved" => Ok(ListKind::Saved),
            other => Err(ListKindParseError(other.to_string())),
        }
    }
}
