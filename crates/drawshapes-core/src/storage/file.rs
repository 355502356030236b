//! File-based storage.

use super::{SceneStorage, StorageError, StorageResult};
use crate::codec;
use crate::scene::Scene;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of scene files.
pub const SCENE_EXTENSION: &str = "shapes";

/// Write a scene to an arbitrary path, truncating any existing file.
pub fn save_to_path(path: impl AsRef<Path>, scene: &Scene) -> StorageResult<()> {
    let path = path.as_ref();
    fs::write(path, codec::serialize(scene))
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("Saved {} shapes to {}", scene.len(), path.display());
    Ok(())
}

/// Read a scene from an arbitrary path.
pub fn load_from_path(path: impl AsRef<Path>) -> StorageResult<Scene> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let scene: Scene = text.parse()?;
    log::info!("Loaded {} shapes from {}", scene.len(), path.display());
    Ok(scene)
}

/// File-based storage.
///
/// Stores each scene as a `.shapes` text file in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for scene files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/drawshapes/scenes/`
    /// On Windows: `%LOCALAPPDATA%\drawshapes\scenes\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("drawshapes").join("scenes"))
    }

    /// Get the file path for a scene ID.
    fn scene_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.{}", safe_id, SCENE_EXTENSION))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl SceneStorage for FileStorage {
    fn save(&self, id: &str, scene: &Scene) -> StorageResult<()> {
        save_to_path(self.scene_path(id), scene)
    }

    fn load(&self, id: &str) -> StorageResult<Scene> {
        load_from_path(self.scene_path(id)).map_err(|e| match e {
            StorageError::NotFound(_) => StorageError::NotFound(id.to_string()),
            other => other,
        })
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.scene_path(id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut ids = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == SCENE_EXTENSION) {
                if let Some(name) = path.file_stem().and_then(|n| n.to_str()) {
                    ids.push(name.to_string());
                }
            }
        }
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.scene_path(id).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::shapes::{Color, Shape};
    use tempfile::tempdir;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_shape(Shape::rectangle(Color::Yellow, Point::new(424, 311), 100, 200));
        let id = scene.add_shape(Shape::square(Color::Green, Point::new(5, 5), 10));
        scene.mark_selected(&[id]);
        scene
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let scene = sample_scene();

        storage.save("test-scene", &scene).unwrap();
        let text = fs::read_to_string(dir.path().join("test-scene.shapes")).unwrap();
        assert_eq!(
            text,
            "RECTANGLE 424 311 100 200 YELLOW false\nSQUARE 5 5 10 GREEN true\n"
        );

        let loaded = storage.load("test-scene").unwrap();
        assert_eq!(loaded.to_string(), scene.to_string());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = storage.load("nonexistent");
        assert!(matches!(result, Err(StorageError::NotFound(id)) if id == "nonexistent"));
    }

    #[test]
    fn test_file_storage_list() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("scene1", &Scene::new()).unwrap();
        storage.save("scene2", &sample_scene()).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"scene1".to_string()));
        assert!(list.contains(&"scene2".to_string()));
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("test", &sample_scene()).unwrap();
        assert!(storage.exists("test").unwrap());

        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_id() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("test/scene:with*special", &sample_scene()).unwrap();
        assert!(dir.path().join("test_scene_with_special.shapes").exists());

        let loaded = storage.load("test/scene:with*special").unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_malformed_file_is_codec_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.shapes");
        fs::write(&path, "SQUARE 1 2 3 RED false\nHEXAGON 1 2 3").unwrap();

        let result = load_from_path(&path);
        assert!(matches!(result, Err(StorageError::Codec(_))));
    }

    #[test]
    fn test_save_to_path_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.txt");
        save_to_path(&path, &sample_scene()).unwrap();
        save_to_path(&path, &Scene::new()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert!(load_from_path(&path).unwrap().is_empty());
    }
}
