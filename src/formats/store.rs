use crate::domain::model::{Decoded, Part};
use crate::domain::ports::Storage;
use crate::formats::registry::FormatRegistry;
use crate::utils::error::{Result, ShopError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub path: PathBuf,
    pub records: usize,
    pub bytes: usize,
}

/// Load and save contracts: picks a codec by extension, moves the bytes
/// through `Storage`. Holds no state between calls.
pub struct FormatStore<S: Storage> {
    storage: S,
    registry: FormatRegistry,
}

impl<S: Storage> FormatStore<S> {
    pub fn new(storage: S, registry: FormatRegistry) -> Self {
        Self { storage, registry }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn load(&self, path: &Path) -> Result<Decoded> {
        let codec = self.registry.loader_for(path)?;
        let data = self.storage.read_file(path)?;

        let decoded = codec.decode(&data).map_err(|e| match e {
            ShopError::EncodingError { .. } => ShopError::EncodingError {
                path: path.display().to_string(),
            },
            other => other,
        })?;

        if decoded.skipped > 0 {
            tracing::warn!(
                "Loaded {} record(s) from {}, skipped {} malformed line(s)",
                decoded.parts.len(),
                path.display(),
                decoded.skipped
            );
        } else {
            tracing::info!("Loaded {} record(s) from {}", decoded.parts.len(), path.display());
        }
        Ok(decoded)
    }

    /// Never fails: errors are logged and an empty list comes back.
    pub fn load_or_empty(&self, path: &Path) -> Vec<Part> {
        match self.load(path) {
            Ok(decoded) => decoded.parts,
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    /// Writes the whole list, overwriting any existing file. Nothing is
    /// written when the extension is not registered.
    pub fn save(&self, path: &Path, parts: &[Part]) -> Result<SaveReport> {
        let codec = self.registry.saver_for(path)?;
        let data = codec.encode(parts)?;
        self.storage.write_file(path, &data)?;

        tracing::info!(
            "Saved {} record(s) as {} to {}",
            parts.len(),
            codec.extension(),
            path.display()
        );
        Ok(SaveReport {
            path: path.to_path_buf(),
            records: parts.len(),
            bytes: data.len(),
        })
    }

    /// Loads `input` and writes the same parts to `output`.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<(Decoded, SaveReport)> {
        let decoded = self.load(input)?;
        let report = self.save(output, &decoded.parts)?;
        Ok((decoded, report))
    }
}
