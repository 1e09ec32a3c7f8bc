#![forbid(unsafe_code)]

pub mod repository;
pub mod slots;
pub mod sqlite;

pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
