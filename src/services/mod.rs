//! Business logic services

pub mod books;

use std::sync::Arc;

pub use books::{BookService, StoreBookService};

use crate::repository::BookStore;

/// Container for all services
pub struct Services {
    pub books: Arc<dyn BookService>,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            books: Arc::new(StoreBookService::new(store)),
        }
    }
}
