//! Book aggregate and its author associations.
//!
//! `Book` doubles as the persisted shape and the incoming candidate shape:
//! all scalar fields are `Option`, so a PUT body carrying only a title merges
//! cleanly into the stored row (unset fields are left alone). Persisted books
//! returned by the store always have `id`, `title`, `isbn` and `copyright`
//! populated.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::author::Author;
use super::section::Section;

/// One edge of the book/author many-to-many relationship.
///
/// The persisted row is `(book_id, author_id)`; the book side is always the
/// owning book, so the in-memory edge only needs to carry the author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Wrote {
    pub author: Author,
}

impl Wrote {
    pub fn new(author: Author) -> Self {
        Self { author }
    }
}

/// The aggregate root: a book referencing one section and owning its `Wrote`
/// associations. Deleting a book deletes its associations but never the
/// authors or section behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub copyright: Option<i32>,
    pub section: Option<Section>,
    #[serde(default)]
    pub wrotes: Vec<Wrote>,
}

impl Book {
    /// Candidate book for create/update requests.
    pub fn new(title: &str, isbn: &str, copyright: i32, section: Section) -> Self {
        Self {
            id: None,
            title: Some(title.to_string()),
            isbn: Some(isbn.to_string()),
            copyright: Some(copyright),
            section: Some(section),
            wrotes: Vec::new(),
        }
    }
}
