//! TagMatchMode - How to match tags in offer searches

use serde::{Deserialize, Serialize};

/// Tag matching mode for search filtering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TagMatchMode {
    /// Match all of the specified tags (AND)
    #[default]
    All,
    /// Match any of the specified tags (OR)
    Any,
}

impl std::fmt::Display for TagMatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagMatchMode::All => write!(f, "all"),
            TagMatchMode::Any => write!(f, "any"),
        }
    }
}

impl std::str::FromStr for TagMatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TagMatchMode::All),
            "any" => Ok(TagMatchMode::Any),
            _ => Err(format!("Unknown tag match mode: {}", s)),
        }
    }
}
