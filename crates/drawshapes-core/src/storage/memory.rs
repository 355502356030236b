//! In-memory storage implementation.

use super::{SceneStorage, StorageError, StorageResult};
use crate::codec;
use crate::scene::Scene;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
///
/// Scenes are kept as serialized text, so a load behaves exactly like reading a file back.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    scenes: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl SceneStorage for MemoryStorage {
    fn save(&self, id: &str, scene: &Scene) -> StorageResult<()> {
        let text = codec::serialize(scene);
        let mut scenes = self.scenes.write().map_err(lock_error)?;
        scenes.insert(id.to_string(), text);
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<Scene> {
        let scenes = self.scenes.read().map_err(lock_error)?;
        let text = scenes
            .get(id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        Ok(text.parse()?)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut scenes = self.scenes.write().map_err(lock_error)?;
        scenes.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let scenes = self.scenes.read().map_err(lock_error)?;
        Ok(scenes.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let scenes = self.scenes.read().map_err(lock_error)?;
        Ok(scenes.contains_key(id))
    }
}
