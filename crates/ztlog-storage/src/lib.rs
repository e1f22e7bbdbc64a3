//! Durable credential storage for the ZTLog admin client.
//!
//! Backends:
//! - [`FileStorage`]: a JSON object file (`~/.ztlog/credentials.json`),
//!   the terminal counterpart of browser local storage
//! - [`MemoryStorage`]: process-local, for tests and throwaway sessions

mod file;
mod keys;
mod memory;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use traits::CredentialStorage;

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing file exists but is not a JSON object of strings
    #[error("Corrupt storage file {path}: {reason}")]
    Corrupt { path: String, reason: String },

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Create the default file-backed storage at `path`.
pub fn create_storage(path: &Path) -> StorageResult<Arc<dyn CredentialStorage>> {
    let storage = FileStorage::open(path)?;
    Ok(Arc::new(storage))
}
