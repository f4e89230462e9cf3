//! In-memory book store.
//!
//! Backs the service tests: each test builds a fresh store, seeds exactly the
//! authors, sections and books it needs, and throws it away. Also handy for
//! running the server without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, Section},
    repository::BookStore,
};

#[derive(Default)]
struct State {
    books: BTreeMap<i64, Book>,
    authors: BTreeMap<i64, Author>,
    sections: BTreeMap<i64, Section>,
    next_book_id: i64,
    next_author_id: i64,
    next_section_id: i64,
}

#[derive(Default)]
pub struct MemoryBookStore {
    state: RwLock<State>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an author, assigning its id.
    pub async fn add_author(&self, firstname: &str, lastname: &str) -> Author {
        let mut state = self.state.write().await;
        state.next_author_id += 1;
        let id = state.next_author_id;
        let author = Author::new(id, firstname, lastname);
        state.authors.insert(id, author.clone());
        author
    }

    /// Seed a section, assigning its id.
    pub async fn add_section(&self, name: &str) -> Section {
        let mut state = self.state.write().await;
        state.next_section_id += 1;
        let id = state.next_section_id;
        let section = Section::new(id, name);
        state.sections.insert(id, section.clone());
        section
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let state = self.state.read().await;
        Ok(state.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let state = self.state.read().await;
        Ok(state.books.get(&id).cloned())
    }

    async fn find_author(&self, id: i64) -> AppResult<Option<Author>> {
        let state = self.state.read().await;
        Ok(state.authors.get(&id).cloned())
    }

    async fn find_section(&self, id: i64) -> AppResult<Option<Section>> {
        let state = self.state.read().await;
        Ok(state.sections.get(&id).cloned())
    }

    async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let state = self.state.read().await;
        // persisted books always carry Some(id), so a None exclude never matches
        Ok(state
            .books
            .values()
            .any(|b| b.isbn.as_deref() == Some(isbn) && b.id != exclude_id))
    }

    async fn insert(&self, mut book: Book) -> AppResult<Book> {
        let mut state = self.state.write().await;
        state.next_book_id += 1;
        let id = state.next_book_id;
        book.id = Some(id);
        state.books.insert(id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i64, mut book: Book) -> AppResult<Book> {
        let mut state = self.state.write().await;
        if !state.books.contains_key(&id) {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        book.id = Some(id);
        state.books.insert(id, book.clone());
        Ok(book)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut state = self.state.write().await;
        // dropping the book drops its wrote edges with it
        state
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn delete_all(&self) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.books.clear();
        Ok(())
    }
}
