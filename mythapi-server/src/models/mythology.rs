//! Mythology (pantheon) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::God;

/// A named pantheon grouping gods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Mythology {
    pub id: i64,
    pub name: String,
    #[sqlx(skip)]
    #[serde(default)]
    pub gods: Vec<God>,
}
