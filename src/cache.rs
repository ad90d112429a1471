//! Per-file persistence index with a versioned payload format.
//!
//! Downstream tooling (incremental re-reporting, caching unchanged files
//! between runs) addresses mutation data by source file and must be able to
//! reconstruct the original classification on read-back without re-running
//! anything. Payloads therefore carry an explicit format version instead of
//! being an implicit whole-object dump.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collector::Collector;
use crate::mutant::Mutant;
use crate::outcome::MutantResult;

/// Current payload format version.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// One ingested item as stored in the per-file index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CachedItem {
    /// An executed outcome, classification included.
    Executed(MutantResult),
    /// An uncovered mutant that was never executed.
    Shadow(Mutant),
}

impl CachedItem {
    fn mutant(&self) -> &Mutant {
        match self {
            Self::Executed(result) => result.mutant(),
            Self::Shadow(mutant) => mutant,
        }
    }

    fn is_shadow(&self) -> bool {
        matches!(self, Self::Shadow(_))
    }
}

#[derive(Serialize, Deserialize)]
struct CacheEnvelope {
    version: u32,
    item: serde_json::Value,
}

/// Cache faults.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Payload did not serialize or parse.
    #[error("cache payload error: {0}")]
    Payload(#[from] serde_json::Error),
    /// Payload was written by an incompatible format version.
    #[error("unsupported cache format version {found}, expected {expected}")]
    Version {
        /// Version found in the payload.
        found: u32,
        /// Version this build reads and writes.
        expected: u32,
    },
    /// A mutant cannot be indexed because its mutation names no file.
    #[error("mutant `{mutator}` at line {line} has no source file to group by")]
    MissingFile {
        /// Mutation operator of the offending mutant.
        mutator: String,
        /// Line of the offending mutant.
        line: u32,
    },
}

/// Serialize one item into an opaque, versioned payload string.
pub fn encode_item(item: &CachedItem) -> Result<String, CacheError> {
    let envelope = CacheEnvelope {
        version: CACHE_FORMAT_VERSION,
        item: serde_json::to_value(item)?,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Reconstruct an item from a payload produced by [`encode_item`].
pub fn decode_item(payload: &str) -> Result<CachedItem, CacheError> {
    let envelope: CacheEnvelope = serde_json::from_str(payload)?;
    if envelope.version != CACHE_FORMAT_VERSION {
        return Err(CacheError::Version {
            found: envelope.version,
            expected: CACHE_FORMAT_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.item)?)
}

/// One entry of the per-file index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Opaque versioned payload, decodable with [`decode_item`].
    pub payload: String,
    /// True when the entry is an uncovered mutant rather than an executed
    /// outcome.
    pub is_shadow: bool,
}

/// Index every retained item of a run by the source file of its mutation.
///
/// Executed outcomes come first (escaped, errored, timed out, killed, each
/// in completion order), then retained shadows. A mutant whose mutation
/// names no file is a fault, not a silent skip: dropping it here would make
/// the persisted run disagree with the collected one.
pub fn file_index(collector: &Collector) -> Result<BTreeMap<String, Vec<FileEntry>>, CacheError> {
    let executed = collector
        .escaped()
        .iter()
        .chain(collector.errors())
        .chain(collector.timeouts())
        .chain(collector.killed())
        .cloned()
        .map(CachedItem::Executed);
    let shadows = collector.shadows().iter().cloned().map(CachedItem::Shadow);

    let mut index: BTreeMap<String, Vec<FileEntry>> = BTreeMap::new();
    for item in executed.chain(shadows) {
        let mutant = item.mutant();
        let file = &mutant.mutation.file;
        if file.is_empty() {
            return Err(CacheError::MissingFile {
                mutator: mutant.mutator.clone(),
                line: mutant.line,
            });
        }
        let entry = FileEntry {
            payload: encode_item(&item)?,
            is_shadow: item.is_shadow(),
        };
        index.entry(file.clone()).or_default().push(entry);
    }

    Ok(index)
}
