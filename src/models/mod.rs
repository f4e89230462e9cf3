//! Domain models

pub mod author;
pub mod book;
pub mod section;

pub use author::Author;
pub use book::{Book, Wrote};
pub use section::Section;
