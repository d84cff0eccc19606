use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::config::StorageKind;

/// Destination of generated artifacts
///
/// Paths are the forward-slash paths produced by the naming strategy,
/// relative to the storage root.
pub trait StorageStrategy: Send + Sync {
    fn write(&self, path: &str, content: &str) -> anyhow::Result<()>;
}

/// Writes artifacts below a root directory, creating folders as needed
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStorage { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl StorageStrategy for FileStorage {
    fn write(&self, path: &str, content: &str) -> anyhow::Result<()> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&target, content)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        Ok(())
    }
}

/// Keeps artifacts in memory, keyed by path
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files().get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.files().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }

    /// Copy of every stored artifact
    pub fn files(&self) -> BTreeMap<String, String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StorageStrategy for MemoryStorage {
    fn write(&self, path: &str, content: &str) -> anyhow::Result<()> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), content.to_string());
        Ok(())
    }
}

/// Storage for the configured kind; file storage is rooted at `root`
pub fn storage_for(kind: StorageKind, root: &Path) -> Box<dyn StorageStrategy> {
    match kind {
        StorageKind::File => Box::new(FileStorage::new(root)),
        StorageKind::Memory => Box::new(MemoryStorage::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_creates_folders() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write("gen/a/b/X.generated.ts", "export {}").unwrap();
        let written = fs::read_to_string(dir.path().join("gen/a/b/X.generated.ts")).unwrap();
        assert_eq!(written, "export {}");
    }

    #[test]
    fn test_memory_storage_overwrites() {
        let storage = MemoryStorage::new();
        storage.write("a.ts", "1").unwrap();
        storage.write("a.ts", "2").unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("a.ts").as_deref(), Some("2"));
    }
}
