//! God, alias and write-side input models

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for god and alias names
const MAX_GOD_NAME_LEN: usize = 128;

/// No control characters anywhere in a name
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\p{Cc}]+$").expect("invalid god name regex"));

/// Validated god name: trimmed, non-blank, printable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GodName(String);

impl GodName {
    /// Create a new god name.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Must not be blank after trimming
    /// - Max 128 characters
    /// - No control characters
    ///
    /// # Example
    /// ```
    /// use mythapi_server::models::GodName;
    ///
    /// assert_eq!(GodName::new("  Odin ").unwrap().as_str(), "Odin");
    /// assert!(GodName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        if trimmed.chars().count() > MAX_GOD_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_GOD_NAME_LEN,
            });
        }

        if !NAME_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "name",
                reason: "must not contain control characters",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Alternate name for a god
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    pub id: i64,
    pub god_id: i64,
    pub name: String,
}

/// A deity belonging to exactly one mythology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct God {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub mythology_id: i64,
    #[sqlx(skip)]
    #[serde(default)]
    pub aliases: Vec<Alias>,
}

impl fmt::Display for God {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Id: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "MythologyId: {}", self.mythology_id)
    }
}

/// Create/update payload. Aliases are not settable through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GodInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub mythology_id: i64,
}

impl GodInput {
    /// Validated name of this input.
    pub fn god_name(&self) -> Result<GodName, ValidationError> {
        GodName::new(&self.name)
    }
}
