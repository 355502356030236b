//! Storage abstraction for persisted scenes.
//!
//! Backends store scenes in the text format of [`crate::codec`], keyed by a name.

mod file;
mod memory;

pub use file::{FileStorage, load_from_path, save_to_path};
pub use memory::MemoryStorage;

use crate::codec::CodecError;
use crate::scene::Scene;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Scene not found: {0}")]
    NotFound(String),
    #[error("Invalid scene file: {0}")]
    Codec(#[from] CodecError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for scene storage backends.
pub trait SceneStorage: Send + Sync {
    /// Save a scene, replacing any scene stored under the same id.
    fn save(&self, id: &str, scene: &Scene) -> StorageResult<()>;

    /// Load a scene.
    fn load(&self, id: &str) -> StorageResult<Scene>;

    /// Delete a scene. Deleting a missing scene is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all scene IDs.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a scene exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}
