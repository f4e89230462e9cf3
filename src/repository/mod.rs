//! Storage layer for book aggregates.
//!
//! The service talks to the store through the [`BookStore`] trait so tests can
//! run against [`MemoryBookStore`] with a fresh state per test while
//! production uses [`PgBookStore`].

pub mod memory;
pub mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Author, Book, Section},
};

/// Persistence operations over books and the entities they reference.
///
/// `insert` and `update` expect a fully resolved book: section and wrote
/// authors looked up by the caller, every scalar field populated. The store
/// only persists; resolution and merge policy live in the service layer.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All persisted books, in store order.
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    /// One book by id, `None` when absent.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// One author by id, `None` when absent.
    async fn find_author(&self, id: i64) -> AppResult<Option<Author>>;

    /// One section by id, `None` when absent.
    async fn find_section(&self, id: i64) -> AppResult<Option<Section>>;

    /// Whether any book other than `exclude_id` already uses this ISBN.
    async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i64>) -> AppResult<bool>;

    /// Persist a new book and its wrote rows, assigning the id.
    async fn insert(&self, book: Book) -> AppResult<Book>;

    /// Overwrite a persisted book's fields and rewrite its wrote rows.
    /// Fails with `NotFound` when the id is absent.
    async fn update(&self, id: i64, book: Book) -> AppResult<Book>;

    /// Delete a book and cascade its wrote rows. Fails with `NotFound` when
    /// the id is absent. Authors and sections are untouched.
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Delete every book and all wrote rows.
    async fn delete_all(&self) -> AppResult<()>;
}
