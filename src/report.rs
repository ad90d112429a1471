//! Report-ready grouping over collected outcomes.

use serde::Serialize;

use crate::collector::Collector;
use crate::mutant::Mutant;
use crate::outcome::MutantResult;

/// Flattened report entry for one executed outcome.
///
/// Captured output is reduced to its first line: a report listing hundreds
/// of mutants must stay scannable, and the first line typically carries the
/// assertion or error summary. The full text stays available on the
/// underlying [`MutantResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutantRecord {
    /// Source file of the mutation site.
    pub file: String,
    /// Mutation operator identifier.
    pub mutator: String,
    /// Enclosing class, when known.
    pub class: Option<String>,
    /// Enclosing method, when known.
    pub method: Option<String>,
    /// Line of the mutation site.
    pub line: u32,
    /// First line of captured standard error.
    pub stderr: String,
    /// First line of captured standard output, when retained.
    pub stdout: Option<String>,
}

impl MutantRecord {
    fn from_result(result: &MutantResult) -> Self {
        let mutant = result.mutant();
        Self {
            file: mutant.file.clone(),
            mutator: mutant.mutator.clone(),
            class: mutant.class.clone(),
            method: mutant.method.clone(),
            line: mutant.line,
            stderr: first_line(result.stderr()).to_string(),
            stdout: result.stdout().map(|out| first_line(out).to_string()),
        }
    }
}

/// Report entry for an uncovered mutant.
///
/// No execution fields: shadows were never run. Equality over this
/// five-field tuple drives deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UncoveredRecord {
    /// Source file of the mutation site.
    pub file: String,
    /// Mutation operator identifier.
    pub mutator: String,
    /// Enclosing class, when known.
    pub class: Option<String>,
    /// Enclosing method, when known.
    pub method: Option<String>,
    /// Line of the mutation site.
    pub line: u32,
}

impl UncoveredRecord {
    fn from_mutant(mutant: &Mutant) -> Self {
        Self {
            file: mutant.file.clone(),
            mutator: mutant.mutator.clone(),
            class: mutant.class.clone(),
            method: mutant.method.clone(),
            line: mutant.line,
        }
    }
}

/// All collected mutants grouped by outcome, shaped for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedMutants {
    /// Deduplicated uncovered mutants.
    pub uncovered: Vec<UncoveredRecord>,
    /// Escaped outcomes.
    pub escaped: Vec<MutantRecord>,
    /// Errored outcomes.
    pub errored: Vec<MutantRecord>,
    /// Timed-out outcomes.
    pub timeouts: Vec<MutantRecord>,
    /// Killed outcomes.
    pub killed: Vec<MutantRecord>,
}

impl GroupedMutants {
    /// Group a collector's buckets into report records.
    pub fn from_collector(collector: &Collector) -> Self {
        Self {
            uncovered: uncovered_group(collector.shadows()),
            escaped: executed_group(collector.escaped()),
            errored: executed_group(collector.errors()),
            timeouts: executed_group(collector.timeouts()),
            killed: executed_group(collector.killed()),
        }
    }
}

/// Shadow-only view for reports that list untested code separately from
/// mutation-kill results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedShadows {
    /// Deduplicated uncovered mutants.
    pub shadows: Vec<UncoveredRecord>,
}

impl GroupedShadows {
    /// Build the shadow-only view from a collector.
    pub fn from_collector(collector: &Collector) -> Self {
        Self {
            shadows: uncovered_group(collector.shadows()),
        }
    }
}

fn executed_group(results: &[MutantResult]) -> Vec<MutantRecord> {
    results.iter().map(MutantRecord::from_result).collect()
}

/// The same construct is frequently targeted by more than one mutant of the
/// same operator; reporting each site once per operator is the intended
/// "this code path is entirely untested" signal. Linear containment check,
/// bounded by one run's mutant count.
fn uncovered_group(shadows: &[Mutant]) -> Vec<UncoveredRecord> {
    let mut group: Vec<UncoveredRecord> = Vec::new();
    for mutant in shadows {
        let record = UncoveredRecord::from_mutant(mutant);
        if !group.contains(&record) {
            group.push(record);
        }
    }
    group
}

/// Text up to the first newline boundary; the whole text when there is
/// none. A trailing `\r` is dropped.
fn first_line(text: &str) -> &str {
    match text.split_once('\n') {
        Some((head, _)) => head.strip_suffix('\r').unwrap_or(head),
        None => text,
    }
}
