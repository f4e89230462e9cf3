//! Book service: lookup, create, partial-merge update, delete.
//!
//! The HTTP layer depends on the [`BookService`] trait only, so controller
//! tests substitute a hand-written double instead of standing up a store.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Section, Wrote},
    repository::BookStore,
};

/// The capability set the HTTP adapter relies on.
#[async_trait]
pub trait BookService: Send + Sync {
    /// Every persisted book.
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    /// One book by id; `NotFound` when absent.
    async fn find_book_by_id(&self, id: i64) -> AppResult<Book>;

    /// Create a book. The section and every wrote author are resolved by id;
    /// the ISBN must not already be in use.
    async fn save(&self, candidate: Book) -> AppResult<Book>;

    /// Partial-merge update: fields set on the candidate overwrite the
    /// persisted book, unset fields are preserved. A non-empty association
    /// set replaces the persisted one wholesale.
    async fn update(&self, candidate: Book, id: i64) -> AppResult<Book>;

    /// Delete a book and its associations; `NotFound` when absent.
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Delete every book. Authors and sections stay.
    async fn delete_all(&self) -> AppResult<()>;
}

/// Production implementation over a [`BookStore`].
pub struct StoreBookService {
    store: Arc<dyn BookStore>,
}

impl StoreBookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Resolve a section reference to the persisted section.
    async fn resolve_section(&self, reference: &Section) -> AppResult<Section> {
        let id = reference
            .id
            .ok_or_else(|| AppError::Validation("section id is required".to_string()))?;
        self.store
            .find_section(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Section with id {} not found", id)))
    }

    /// Resolve an association set: authors looked up by id, duplicate
    /// (book, author) edges dropped. Any placeholder book reference a caller
    /// supplied is discarded here; the store binds rows to the real book.
    async fn resolve_wrotes(&self, wrotes: &[Wrote]) -> AppResult<Vec<Wrote>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::with_capacity(wrotes.len());
        for wrote in wrotes {
            let id = wrote
                .author
                .id
                .ok_or_else(|| AppError::Validation("author id is required".to_string()))?;
            if !seen.insert(id) {
                continue;
            }
            let author = self
                .store
                .find_author(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;
            resolved.push(Wrote::new(author));
        }
        Ok(resolved)
    }
}

/// Overwrite the persisted scalar fields with whatever the candidate set.
/// Section and associations are merged by the caller, after resolution.
fn merge_fields(mut persisted: Book, candidate: &Book) -> Book {
    if let Some(title) = &candidate.title {
        persisted.title = Some(title.clone());
    }
    if let Some(isbn) = &candidate.isbn {
        persisted.isbn = Some(isbn.clone());
    }
    if let Some(copyright) = candidate.copyright {
        persisted.copyright = Some(copyright);
    }
    persisted
}

#[async_trait]
impl BookService for StoreBookService {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        self.store.find_all().await
    }

    async fn find_book_by_id(&self, id: i64) -> AppResult<Book> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn save(&self, candidate: Book) -> AppResult<Book> {
        let title = candidate
            .title
            .clone()
            .ok_or_else(|| AppError::Validation("book title is required".to_string()))?;
        let isbn = candidate
            .isbn
            .clone()
            .ok_or_else(|| AppError::Validation("book isbn is required".to_string()))?;
        let copyright = candidate
            .copyright
            .ok_or_else(|| AppError::Validation("book copyright year is required".to_string()))?;
        let section_ref = candidate
            .section
            .as_ref()
            .ok_or_else(|| AppError::Validation("book section is required".to_string()))?;

        let section = self.resolve_section(section_ref).await?;

        if self.store.isbn_exists(&isbn, None).await? {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists",
                isbn
            )));
        }

        let wrotes = self.resolve_wrotes(&candidate.wrotes).await?;

        let book = Book {
            id: None,
            title: Some(title),
            isbn: Some(isbn),
            copyright: Some(copyright),
            section: Some(section),
            wrotes,
        };

        let created = self.store.insert(book).await?;
        tracing::info!(id = ?created.id, "Book created");
        Ok(created)
    }

    async fn update(&self, candidate: Book, id: i64) -> AppResult<Book> {
        let persisted = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(isbn) = &candidate.isbn {
            if self.store.isbn_exists(isbn, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "A book with ISBN {} already exists",
                    isbn
                )));
            }
        }

        let mut merged = merge_fields(persisted, &candidate);

        if let Some(section_ref) = &candidate.section {
            merged.section = Some(self.resolve_section(section_ref).await?);
        }

        // Replace-if-present: a non-empty candidate set replaces the whole
        // persisted association set; an empty one leaves it alone.
        if !candidate.wrotes.is_empty() {
            merged.wrotes = self.resolve_wrotes(&candidate.wrotes).await?;
        }

        let updated = self.store.update(id, merged).await?;
        tracing::info!(id, "Book updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!(id, "Book deleted");
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.store.delete_all().await?;
        tracing::info!("All books deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;

    fn persisted() -> Book {
        let mut book = Book::new("Flatterland", "9780738206752", 2001, Section::new(1, "Fiction"));
        book.id = Some(26);
        book
    }

    #[test]
    fn merge_overwrites_only_set_fields() {
        let candidate = Book {
            id: None,
            title: Some("Test updated book".to_string()),
            isbn: None,
            copyright: None,
            section: None,
            wrotes: Vec::new(),
        };

        let merged = merge_fields(persisted(), &candidate);
        assert_eq!(merged.title.as_deref(), Some("Test updated book"));
        assert_eq!(merged.isbn.as_deref(), Some("9780738206752"));
        assert_eq!(merged.copyright, Some(2001));
        assert_eq!(merged.section, Some(Section::new(1, "Fiction")));
    }

    #[test]
    fn merge_with_empty_candidate_changes_nothing() {
        let candidate = Book {
            id: None,
            title: None,
            isbn: None,
            copyright: None,
            section: None,
            wrotes: Vec::new(),
        };

        let merged = merge_fields(persisted(), &candidate);
        assert_eq!(merged, persisted());
    }

    #[test]
    fn merge_overwrites_every_set_field() {
        let candidate = Book::new("Test Book", "0000000000000", 2020, Section::new(2, "Travel"));

        let merged = merge_fields(persisted(), &candidate);
        assert_eq!(merged.title.as_deref(), Some("Test Book"));
        assert_eq!(merged.isbn.as_deref(), Some("0000000000000"));
        assert_eq!(merged.copyright, Some(2020));
        // section is resolved and merged by the service, not here
        assert_eq!(merged.section, Some(Section::new(1, "Fiction")));
    }
}
