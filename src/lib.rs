//! # mutant-collector
//!
//! Result classification and aggregation core for mutation-testing runs,
//! organized around:
//! - `mutant`: mutation-site data model
//! - `outcome`: executed-mutant outcomes and the fixed classification policy
//! - `collector`: the run-wide accumulator and its counter snapshot
//! - `report`: grouped, deduplicated, truncated views for renderers
//! - `cache`: per-file index with versioned payloads for persistence
//!
//! Mutant generation, test-suite execution, coverage analysis, and final
//! report rendering are external collaborators: this crate only classifies,
//! counts, and shapes their data.

#![warn(missing_docs)]

pub mod cache;
pub mod collector;
pub mod mutant;
pub mod outcome;
pub mod report;

pub use cache::{
    CACHE_FORMAT_VERSION, CacheError, CachedItem, FileEntry, decode_item, encode_item, file_index,
};
pub use collector::{Collector, RunTotals};
pub use mutant::{Mutant, Mutation};
pub use outcome::{ExecutionSignals, MutantResult, Verdict};
pub use report::{GroupedMutants, GroupedShadows, MutantRecord, UncoveredRecord};
