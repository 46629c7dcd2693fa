//! Threshold bundle persistence via bincode.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::bundle::ThresholdBundle;
use crate::error::IoError;

/// Current binary format version.
const FORMAT_VERSION: u32 = 1;

const ENTRY_SUFFIX: &str = ".thresholds.bin";

/// Versioned envelope for a stored bundle.
#[derive(serde::Serialize, serde::Deserialize)]
struct BundleEnvelope {
    format_version: u32,
    /// Number of cells with thresholds.
    n_cells: usize,
    bundle: ThresholdBundle,
}

/// Key-value store of threshold bundles keyed by reference identifier.
pub trait ThresholdCache {
    /// Load the bundle stored for `id`.
    ///
    /// Returns [`IoError::MissingCacheEntry`] when nothing is stored.
    fn load(&self, id: &str) -> Result<ThresholdBundle, IoError>;

    /// Store `bundle` under its reference identifier, replacing any entry.
    fn store(&self, bundle: &ThresholdBundle) -> Result<(), IoError>;
}

/// Directory-backed cache writing one `<id>.thresholds.bin` file per
/// reference identifier.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the entry for `id`.
    ///
    /// # Errors
    ///
    /// [`IoError::Validation`] if `id` is empty or contains a path separator.
    pub fn entry_path(&self, id: &str) -> Result<PathBuf, IoError> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(IoError::Validation {
                count: 1,
                details: format!("invalid reference identifier '{id}'"),
            });
        }
        Ok(self.dir.join(format!("{id}{ENTRY_SUFFIX}")))
    }
}

impl ThresholdCache for FileCache {
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::MissingCacheEntry`] | no file for `id` |
    /// | [`IoError::Fs`] | file read failed |
    /// | [`IoError::Cache`] | bincode decoding failed, version or key mismatch |
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn load(&self, id: &str) -> Result<ThresholdBundle, IoError> {
        let path = self.entry_path(id)?;
        if !path.exists() {
            return Err(IoError::MissingCacheEntry { id: id.to_string() });
        }

        let bytes = std::fs::read(&path).map_err(|e| IoError::fs(&path, e))?;
        let envelope: BundleEnvelope = bincode::deserialize(&bytes)?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(IoError::Cache {
                reason: format!(
                    "{}: format version {} (expected {FORMAT_VERSION})",
                    path.display(),
                    envelope.format_version
                ),
            });
        }
        if envelope.bundle.reference_id() != id {
            return Err(IoError::Cache {
                reason: format!(
                    "{}: holds thresholds for '{}'",
                    path.display(),
                    envelope.bundle.reference_id()
                ),
            });
        }

        debug!(n_cells = envelope.n_cells, "thresholds loaded");
        Ok(envelope.bundle)
    }

    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Validation`] | invalid reference identifier |
    /// | [`IoError::Cache`] | bincode encoding failed |
    /// | [`IoError::Fs`] | directory creation or file write failed |
    #[instrument(skip(self, bundle), fields(id = bundle.reference_id()))]
    fn store(&self, bundle: &ThresholdBundle) -> Result<(), IoError> {
        let path = self.entry_path(bundle.reference_id())?;
        std::fs::create_dir_all(&self.dir).map_err(|e| IoError::fs(&self.dir, e))?;

        let envelope = BundleEnvelope {
            format_version: FORMAT_VERSION,
            n_cells: bundle.cells().len(),
            bundle: bundle.clone(),
        };
        let bytes = bincode::serialize(&envelope)?;
        std::fs::write(&path, &bytes).map_err(|e| IoError::fs(&path, e))?;

        info!(
            path = %path.display(),
            size_bytes = bytes.len(),
            n_cells = envelope.n_cells,
            "thresholds stored"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn entry_path_layout() {
        let cache = FileCache::new("/cache");
        assert_eq!(
            cache.entry_path("GFDL-ESM2M").unwrap(),
            PathBuf::from("/cache/GFDL-ESM2M.thresholds.bin")
        );
    }

    #[test]
    fn entry_path_rejects_separators() {
        let cache = FileCache::new("/cache");
        assert!(cache.entry_path("a/b").is_err());
        assert!(cache.entry_path("").is_err());
        assert!(cache.entry_path("..").is_err());
    }

    #[test]
    fn missing_entry() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        assert!(matches!(
            cache.load("MIROC5"),
            Err(IoError::MissingCacheEntry { id }) if id == "MIROC5"
        ));
    }

    #[test]
    fn corrupt_entry() {
        let dir = TempDir::new().unwrap();
        let cache = FileCache::new(dir.path());
        std::fs::write(cache.entry_path("bad").unwrap(), b"not a bundle").unwrap();
        assert!(matches!(cache.load("bad"), Err(IoError::Cache { .. })));
    }
}
