//! Section (shelf/genre) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A shelf or genre. Referenced by books, not owned by them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Section {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Section {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
        }
    }
}
