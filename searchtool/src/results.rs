use std::fmt;
use std::path::PathBuf;

/// Totals for one completed search over one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    pub path: PathBuf,
    pub bytes_scanned: u64,
    pub total_matches: u64,
    pub case_insensitive: bool,
}

impl SearchSummary {
    pub fn new(path: impl Into<PathBuf>, bytes_scanned: u64, case_insensitive: bool) -> Self {
        Self {
            path: path.into(),
            bytes_scanned,
            total_matches: 0,
            case_insensitive,
        }
    }

    pub fn add_match(&mut self) {
        self.total_matches += 1;
    }
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found {} matches in {} ({} bytes{})",
            self.total_matches,
            self.path.display(),
            self.bytes_scanned,
            if self.case_insensitive {
                ", ignoring case"
            } else {
                ""
            }
        )
    }
}
