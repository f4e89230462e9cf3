//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// An author. Shared by any number of books through `Wrote` associations and
/// never owned by a single book.
///
/// Incoming payloads may carry only the `id`; the service resolves the rest
/// from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    #[serde(default)]
    pub id: Option<i64>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

impl Author {
    pub fn new(id: i64, firstname: &str, lastname: &str) -> Self {
        Self {
            id: Some(id),
            firstname: Some(firstname.to_string()),
            lastname: Some(lastname.to_string()),
        }
    }
}
