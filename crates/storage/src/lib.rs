#![forbid(unsafe_code)]

pub mod dataset_file;
pub mod repository;
pub mod session_store;
pub mod sqlite;

pub use repository::{InMemoryRepository, StateSlotRepository, Storage, StorageError};
pub use session_store::{STORAGE_KEY, SessionStore, SessionStoreError};
