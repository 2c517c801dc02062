use std::io::Write;
use tracing::{debug, info};

use super::processor::MappedFile;
use super::term::SearchTerm;
use crate::config::SearchConfig;
use crate::errors::SearchResult;
use crate::metrics::ScanMetrics;
use crate::results::SearchSummary;

/// Searches the configured file, writing one decimal offset per line to `out`.
///
/// Offsets are written as they are found, in increasing order. Nothing is
/// written if the term is empty or the file cannot be mapped.
pub fn search<W: Write>(config: &SearchConfig, out: &mut W) -> SearchResult<SearchSummary> {
    search_with_metrics(config, out, &ScanMetrics::new())
}

/// Like [`search`], recording mapping and scan counters into `metrics`.
pub fn search_with_metrics<W: Write>(
    config: &SearchConfig,
    out: &mut W,
    metrics: &ScanMetrics,
) -> SearchResult<SearchSummary> {
    let term = SearchTerm::new(config.term.as_slice(), config.case_insensitive)?;
    info!("Starting search for {:?} in {}", term, config.path.display());

    let mapped = MappedFile::open(&config.path, config.populate)?.with_metrics(metrics);
    let haystack = mapped.as_bytes();

    let mut summary = SearchSummary::new(
        mapped.path(),
        haystack.len() as u64,
        term.is_case_insensitive(),
    );

    for offset in term.find_iter(haystack) {
        writeln!(out, "{}", offset)?;
        summary.add_match();
    }
    out.flush()?;

    debug!("Released mapping for {}", mapped.path().display());
    drop(mapped);

    metrics.record_scan(summary.bytes_scanned, summary.total_matches);
    metrics.log_stats();
    info!("Search complete. {}", summary);

    Ok(summary)
}

/// Collects every match offset of `term` in an in-memory buffer.
pub fn find_offsets(
    haystack: &[u8],
    term: impl Into<Vec<u8>>,
    case_insensitive: bool,
) -> SearchResult<Vec<usize>> {
    let term = SearchTerm::new(term, case_insensitive)?;
    Ok(term.find_iter(haystack).collect())
}
