use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem storage. Relative paths resolve against `base_path` when one
/// is set, otherwise against the working directory.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: Option<PathBuf>,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tracing::debug!("Reading {}", full_path.display());
        let data = fs::read(full_path)?;
        Ok(data)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());
        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ShopError;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read_under_base() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base(temp_dir.path());

        storage.write_file(Path::new("nested/parts.txt"), b"Mouse\t9.99\t5\n").unwrap();

        assert!(temp_dir.path().join("nested/parts.txt").exists());
        assert_eq!(
            storage.read_file(Path::new("nested/parts.txt")).unwrap(),
            b"Mouse\t9.99\t5\n".to_vec()
        );
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base(temp_dir.path());
        assert!(matches!(
            storage.read_file(Path::new("nope.csv")),
            Err(ShopError::IoError(_))
        ));
    }
}
