//! Record sinks: where extracted trademark records end up.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::TrademarkRecord;

/// Extension of every storage file.
const FILE_EXTENSION: &str = "txt";

/// Per-save options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveParams {
    /// Appended to the source name, e.g. the search keyword.
    pub suffix: Option<String>,
}

impl SaveParams {
    pub fn with_suffix(suffix: &str) -> Self {
        Self {
            suffix: Some(suffix.to_string()),
        }
    }
}

/// Persistence boundary for extracted records.
///
/// Implementations must not panic or propagate failures; a failed save is
/// reported by returning `false`.
pub trait RecordSink: Send + Sync {
    /// Persist one record. Returns whether the storage target exists afterwards.
    fn save(&self, record: &TrademarkRecord, source_name: &str, params: &SaveParams) -> bool;
}

/// Storage key: `source[_suffix][_id].txt`.
///
/// Path separators inside components are replaced so a key never escapes
/// the storage directory.
pub fn storage_key(record: &TrademarkRecord, source_name: &str, params: &SaveParams) -> String {
    let mut key = sanitize_component(source_name);
    if let Some(ref suffix) = params.suffix {
        key.push('_');
        key.push_str(&sanitize_component(suffix));
    }
    if !record.id().is_empty() {
        key.push('_');
        key.push_str(&sanitize_component(record.id()));
    }
    format!("{}.{}", key, FILE_EXTENSION)
}

fn sanitize_component(component: &str) -> String {
    component.replace(['/', '\\'], "_")
}

/// Append-only text file sink; one file per storage key.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file a record would be appended to.
    pub fn path_for(
        &self,
        record: &TrademarkRecord,
        source_name: &str,
        params: &SaveParams,
    ) -> PathBuf {
        self.dir.join(storage_key(record, source_name, params))
    }

    fn append(&self, path: &Path, content: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(content.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }
}

impl RecordSink for FileSink {
    fn save(&self, record: &TrademarkRecord, source_name: &str, params: &SaveParams) -> bool {
        let path = self.path_for(record, source_name, params);
        match self.append(&path, &record.to_json()) {
            Ok(()) => {
                debug!("Appended record {} to {}", record.id(), path.display());
                path.exists()
            }
            Err(e) => {
                warn!("Failed to save record to {}: {}", path.display(), e);
                false
            }
        }
    }
}
