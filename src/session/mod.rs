pub mod base;
pub mod file_storage;
pub mod memory_storage;
pub mod state;

// Re-export the primary session items so code outside can do
// "use crate::session::{SessionState, SessionStorage, create_storage};"
pub use base::{create_storage, SessionStorage, StorageError};
pub use state::{Session, SessionError, SessionState, ACCESS_TOKEN_KEY, USER_KEY};
