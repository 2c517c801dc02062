//! Streaming literal search over a borrowed byte buffer.
//!
//! The pieces fit together leaf to root:
//!
//! - [`scanner`] finds the next occurrence of one or two candidate bytes a
//!   machine word at a time.
//! - [`term`] holds the immutable term and, for case-insensitive runs, its
//!   ASCII case-inverted twin.
//! - [`matcher`] drives the scanner through a two-state cursor
//!   (seeking / matching) and yields match offsets lazily.
//! - [`processor`] maps the file read-only and lends its bytes out.
//! - [`engine`] ties a [`SearchConfig`](crate::SearchConfig) to an output
//!   sink.
//!
//! ```
//! use searchtool::search::SearchTerm;
//!
//! let term = SearchTerm::case_insensitive("ab").unwrap();
//! let offsets: Vec<usize> = term.find_iter(b"AbAbAb").collect();
//! assert_eq!(offsets, [0, 2, 4]);
//! ```
pub mod engine;
pub mod matcher;
pub mod processor;
pub mod scanner;
pub mod term;

pub use engine::{find_offsets, search, search_with_metrics};
pub use matcher::{MatchState, Matches};
pub use processor::MappedFile;
pub use term::{fold_byte, SearchTerm};
