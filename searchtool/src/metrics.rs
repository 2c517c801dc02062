use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Tracks mapping and scanning counters for a search run.
///
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct ScanMetrics {
    bytes_mapped: Arc<AtomicU64>,
    peak_mapped: Arc<AtomicU64>,
    files_mapped: Arc<AtomicU64>,
    bytes_scanned: Arc<AtomicU64>,
    matches_found: Arc<AtomicU64>,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self {
            bytes_mapped: Arc::new(AtomicU64::new(0)),
            peak_mapped: Arc::new(AtomicU64::new(0)),
            files_mapped: Arc::new(AtomicU64::new(0)),
            bytes_scanned: Arc::new(AtomicU64::new(0)),
            matches_found: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a newly mapped file
    pub fn record_mmap(&self, bytes: u64) {
        let total = self.bytes_mapped.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.peak_mapped.fetch_max(total, Ordering::Relaxed);
        self.files_mapped.fetch_add(1, Ordering::Relaxed);
        debug!(
            "Memory mapped: {} bytes, total mapped: {} bytes",
            bytes, total
        );
    }

    /// Records unmapping of a file
    pub fn record_munmap(&self, bytes: u64) {
        let total = self.bytes_mapped.fetch_sub(bytes, Ordering::Relaxed) - bytes;
        debug!(
            "Memory unmapped: {} bytes, total mapped: {} bytes",
            bytes, total
        );
    }

    pub fn record_scan(&self, bytes: u64, matches: u64) {
        self.bytes_scanned.fetch_add(bytes, Ordering::Relaxed);
        self.matches_found.fetch_add(matches, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            bytes_mapped: self.bytes_mapped.load(Ordering::Relaxed),
            peak_mapped: self.peak_mapped.load(Ordering::Relaxed),
            files_mapped: self.files_mapped.load(Ordering::Relaxed),
            bytes_scanned: self.bytes_scanned.load(Ordering::Relaxed),
            matches_found: self.matches_found.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Scan stats:\n\
             Memory mapped (current/peak): {}/{} bytes\n\
             Files mapped: {}\n\
             Bytes scanned: {}\n\
             Matches found: {}",
            stats.bytes_mapped,
            stats.peak_mapped,
            stats.files_mapped,
            stats.bytes_scanned,
            stats.matches_found
        );
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`ScanMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub bytes_mapped: u64,
    pub peak_mapped: u64,
    pub files_mapped: u64,
    pub bytes_scanned: u64,
    pub matches_found: u64,
}
