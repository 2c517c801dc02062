use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::{SearchError, SearchResult};
use crate::metrics::ScanMetrics;

/// A read-only view of an entire file, mapped into memory.
///
/// The mapping is released when the value is dropped. Because
/// [`MappedFile::as_bytes`] borrows from `self`, the buffer cannot outlive
/// the mapping, nor can it be unmapped while a search still reads it.
#[derive(Debug)]
pub struct MappedFile {
    path: PathBuf,
    // Zero-length files are never mapped.
    map: Option<Mmap>,
    metrics: Option<ScanMetrics>,
}

impl MappedFile {
    /// Opens and maps `path`, pre-faulting pages when `populate` is set.
    pub fn open(path: &Path, populate: bool) -> SearchResult<Self> {
        trace!("Mapping file: {}", path.display());

        let file = File::open(path).map_err(|e| SearchError::open_failed(path, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| SearchError::stat_failed(path, e))?;

        if !metadata.is_file() {
            return Err(SearchError::not_regular_file(path));
        }

        let size = metadata.len();
        let len = usize::try_from(size).map_err(|_| SearchError::file_too_large(path, size))?;

        let map = if len == 0 {
            debug!("Empty file, nothing to map: {}", path.display());
            None
        } else {
            let mut options = MmapOptions::new();
            options.len(len);
            if populate {
                options.populate();
            }
            // SAFETY: the map is read-only; the file must not be truncated by
            // another process while it is mapped.
            let map =
                unsafe { options.map(&file) }.map_err(|e| SearchError::map_failed(path, e))?;
            debug!("Mapped {} bytes from {}", len, path.display());
            Some(map)
        };

        Ok(Self {
            path: path.to_path_buf(),
            map,
            metrics: None,
        })
    }

    /// Records the mapping in `metrics`, and its release when dropped.
    ///
    /// Empty files are never mapped and leave `metrics` untouched.
    pub fn with_metrics(mut self, metrics: &ScanMetrics) -> Self {
        if self.map.is_some() {
            metrics.record_mmap(self.len() as u64);
            self.metrics = Some(metrics.clone());
        }
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_none()
    }
}

impl Drop for MappedFile {
    fn drop(&mut self) {
        if let Some(metrics) = &self.metrics {
            metrics.record_munmap(self.len() as u64);
        }
        trace!("Unmapping file: {}", self.path.display());
    }
}
