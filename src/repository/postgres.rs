//! Postgres-backed book store

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, Section, Wrote},
    repository::BookStore,
};

/// Scalar columns of the books table; section and wrotes are loaded separately.
#[derive(FromRow)]
struct BookRow {
    id: i64,
    title: String,
    isbn: String,
    copyright: i32,
    section_id: i64,
}

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn assemble(&self, row: BookRow) -> AppResult<Book> {
        let section = sqlx::query_as::<_, Section>("SELECT id, name FROM sections WHERE id = $1")
            .bind(row.section_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("section {} missing for book {}", row.section_id, row.id))
            })?;

        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.firstname, a.lastname
            FROM wrotes w
            JOIN authors a ON a.id = w.author_id
            WHERE w.book_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Book {
            id: Some(row.id),
            title: Some(row.title),
            isbn: Some(row.isbn),
            copyright: Some(row.copyright),
            section: Some(section),
            wrotes: authors.into_iter().map(Wrote::new).collect(),
        })
    }
}

/// Pull the scalar fields out of a resolved book for binding.
fn scalar_fields(book: &Book) -> AppResult<(&str, &str, i32, i64)> {
    let title = book
        .title
        .as_deref()
        .ok_or_else(|| AppError::Internal("unresolved book: title missing".to_string()))?;
    let isbn = book
        .isbn
        .as_deref()
        .ok_or_else(|| AppError::Internal("unresolved book: isbn missing".to_string()))?;
    let copyright = book
        .copyright
        .ok_or_else(|| AppError::Internal("unresolved book: copyright missing".to_string()))?;
    let section_id = book
        .section
        .as_ref()
        .and_then(|s| s.id)
        .ok_or_else(|| AppError::Internal("unresolved book: section id missing".to_string()))?;
    Ok((title, isbn, copyright, section_id))
}

fn author_ids(book: &Book) -> AppResult<Vec<i64>> {
    book.wrotes
        .iter()
        .map(|w| {
            w.author
                .id
                .ok_or_else(|| AppError::Internal("unresolved wrote: author id missing".to_string()))
        })
        .collect()
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, isbn, copyright, section_id FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(self.assemble(row).await?);
        }
        Ok(books)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            "SELECT id, title, isbn, copyright, section_id FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_author(&self, id: i64) -> AppResult<Option<Author>> {
        Ok(
            sqlx::query_as::<_, Author>("SELECT id, firstname, lastname FROM authors WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_section(&self, id: i64) -> AppResult<Option<Section>> {
        Ok(
            sqlx::query_as::<_, Section>("SELECT id, name FROM sections WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(isbn)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, book: Book) -> AppResult<Book> {
        let (title, isbn, copyright, section_id) = scalar_fields(&book)?;
        let authors = author_ids(&book)?;

        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO books (title, isbn, copyright, section_id) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(title)
        .bind(isbn)
        .bind(copyright)
        .bind(section_id)
        .fetch_one(&mut *tx)
        .await?;

        for author_id in authors {
            sqlx::query("INSERT INTO wrotes (book_id, author_id) VALUES ($1, $2)")
                .bind(id)
                .bind(author_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("book {} vanished after insert", id)))
    }

    async fn update(&self, id: i64, book: Book) -> AppResult<Book> {
        let (title, isbn, copyright, section_id) = scalar_fields(&book)?;
        let authors = author_ids(&book)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE books SET title = $1, isbn = $2, copyright = $3, section_id = $4 WHERE id = $5",
        )
        .bind(title)
        .bind(isbn)
        .bind(copyright)
        .bind(section_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        sqlx::query("DELETE FROM wrotes WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for author_id in authors {
            sqlx::query("INSERT INTO wrotes (book_id, author_id) VALUES ($1, $2)")
                .bind(id)
                .bind(author_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("book {} vanished after update", id)))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        // wrote rows go with the book via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        Ok(())
    }
}
