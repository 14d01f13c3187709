#![forbid(unsafe_code)]

pub mod http;
pub mod repository;

pub use http::HttpStore;
pub use repository::{InMemoryStore, QuizStore, StorageError, WorldcupStore};
