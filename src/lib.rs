//! Bookstore inventory service
//!
//! A REST JSON API for managing a bookstore's inventory: books, their
//! authors (through a many-to-many "wrote" relationship) and shelf sections.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
