//! Run-wide accumulation of mutant outcomes.

use serde::Serialize;

use crate::mutant::Mutant;
use crate::outcome::{MutantResult, Verdict};

/// Accumulator every executed or skipped mutant of a run passes through
/// exactly once.
///
/// Explicitly constructed and explicitly passed; there is no ambient
/// per-process instance. The lifecycle is append-only: construct empty,
/// ingest through [`collect`](Self::collect) and
/// [`collect_shadow`](Self::collect_shadow), then query. Ingestion is
/// single-threaded; parallel executors must drain their completions through
/// one serialization point before handing results over. Insertion order
/// within a bucket reflects completion order, not generation order.
#[derive(Debug, Default)]
pub struct Collector {
    total: usize,
    shadow_count: usize,
    shadows: Vec<Mutant>,
    killed: Vec<MutantResult>,
    timeouts: Vec<MutantResult>,
    errors: Vec<MutantResult>,
    escaped: Vec<MutantResult>,
}

impl Collector {
    /// Create an empty collector for a new run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one executed outcome into exactly one bucket.
    ///
    /// The bucket is the result's cached [`Verdict`]; this never fails and
    /// has no effect beyond the collector's own state.
    pub fn collect(&mut self, result: MutantResult) {
        self.total += 1;
        match result.verdict() {
            Verdict::Timeout => self.timeouts.push(result),
            Verdict::Error => self.errors.push(result),
            Verdict::Kill => self.killed.push(result),
            Verdict::Escape => self.escaped.push(result),
        }
    }

    /// Ingest one uncovered mutant that was never executed.
    ///
    /// `None` counts the mutant without retaining it: the upstream coverage
    /// phase may discard the identity of uncovered mutants to save memory,
    /// and the run totals must still include them. A retained mutant is
    /// additionally appended to the shadow list for reporting.
    pub fn collect_shadow(&mut self, mutant: Option<Mutant>) {
        self.total += 1;
        self.shadow_count += 1;
        if let Some(mutant) = mutant {
            self.shadows.push(mutant);
        }
    }

    /// Total ingested mutants, executed and shadow alike.
    pub fn total_count(&self) -> usize {
        self.total
    }

    /// Mutants that were actually executed; the mutation-score denominator.
    pub fn measurable_total(&self) -> usize {
        self.total - self.shadow_count
    }

    /// Detected mutants (killed, timed out, or errored); the mutation-score
    /// numerator.
    pub fn vanquished_total(&self) -> usize {
        self.killed.len() + self.timeouts.len() + self.errors.len()
    }

    /// Count of uncovered mutants, retained or not.
    pub fn shadow_count(&self) -> usize {
        self.shadow_count
    }

    /// Retained uncovered mutants, in ingestion order.
    pub fn shadows(&self) -> &[Mutant] {
        &self.shadows
    }

    /// Count of mutants detected through an explicit test failure.
    pub fn killed_count(&self) -> usize {
        self.killed.len()
    }

    /// Outcomes classified as kills, in completion order.
    pub fn killed(&self) -> &[MutantResult] {
        &self.killed
    }

    /// Count of mutants whose execution timed out.
    pub fn timeout_count(&self) -> usize {
        self.timeouts.len()
    }

    /// Outcomes classified as timeouts, in completion order.
    pub fn timeouts(&self) -> &[MutantResult] {
        &self.timeouts
    }

    /// Count of mutants whose execution errored.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Outcomes classified as errors, in completion order.
    pub fn errors(&self) -> &[MutantResult] {
        &self.errors
    }

    /// Count of mutants the test suite did not detect.
    pub fn escape_count(&self) -> usize {
        self.escaped.len()
    }

    /// Outcomes classified as escapes, in completion order.
    pub fn escaped(&self) -> &[MutantResult] {
        &self.escaped
    }

    /// Immutable counter snapshot for score computation and rendering.
    pub fn totals(&self) -> RunTotals {
        RunTotals {
            total: self.total_count(),
            measurable: self.measurable_total(),
            vanquished: self.vanquished_total(),
            killed: self.killed_count(),
            timeouts: self.timeout_count(),
            errors: self.error_count(),
            escaped: self.escape_count(),
            shadows: self.shadow_count(),
        }
    }
}

/// Frozen run-level counters taken from a [`Collector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    /// All ingested mutants.
    pub total: usize,
    /// Executed mutants (total minus shadows).
    pub measurable: usize,
    /// Detected mutants (killed + timeouts + errors).
    pub vanquished: usize,
    /// Killed mutants.
    pub killed: usize,
    /// Timed-out mutants.
    pub timeouts: usize,
    /// Errored mutants.
    pub errors: usize,
    /// Escaped mutants.
    pub escaped: usize,
    /// Uncovered mutants.
    pub shadows: usize,
}

impl RunTotals {
    /// Mutation score as `vanquished / measurable`.
    ///
    /// `None` when nothing was measurable: an empty run has no score, not a
    /// zero score.
    pub fn mutation_score(&self) -> Option<f64> {
        if self.measurable == 0 {
            None
        } else {
            Some(self.vanquished as f64 / self.measurable as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::mutant::Mutation;
    use crate::outcome::ExecutionSignals;

    fn mutant(file: &str, line: u32) -> Mutant {
        Mutant {
            file: file.to_string(),
            class: Some("Calculator".to_string()),
            method: Some("add".to_string()),
            line,
            mutator: "binop_plus".to_string(),
            mutation: Mutation {
                file: file.to_string(),
                original: "a + b".to_string(),
                replacement: "a - b".to_string(),
            },
        }
    }

    fn result(verdict: Verdict) -> MutantResult {
        let signals = match verdict {
            Verdict::Timeout => ExecutionSignals {
                timed_out: true,
                ..Default::default()
            },
            Verdict::Error => ExecutionSignals {
                errored: true,
                ..Default::default()
            },
            Verdict::Kill => ExecutionSignals {
                killed: true,
                ..Default::default()
            },
            Verdict::Escape => ExecutionSignals::default(),
        };
        MutantResult::new(
            mutant("src/calc.rs", 7),
            signals,
            "stderr text".to_string(),
            None,
        )
    }

    #[test]
    fn mixed_run_scenario_counts() {
        let mut collector = Collector::new();
        collector.collect(result(Verdict::Kill));
        collector.collect(result(Verdict::Escape));
        collector.collect(result(Verdict::Timeout));
        collector.collect_shadow(Some(mutant("src/calc.rs", 12)));

        assert_eq!(collector.total_count(), 4);
        assert_eq!(collector.measurable_total(), 3);
        assert_eq!(collector.vanquished_total(), 2);
        assert_eq!(collector.escape_count(), 1);
        assert_eq!(collector.shadow_count(), 1);
        assert_eq!(collector.shadows().len(), 1);
    }

    #[test]
    fn empty_run_has_no_score() {
        let collector = Collector::new();
        let totals = collector.totals();
        assert_eq!(totals.total, 0);
        assert_eq!(totals.measurable, 0);
        assert_eq!(totals.vanquished, 0);
        assert_eq!(totals.mutation_score(), None);
    }

    #[test]
    fn unretained_shadow_still_counts() {
        let mut collector = Collector::new();
        collector.collect_shadow(None);
        collector.collect_shadow(Some(mutant("src/calc.rs", 3)));

        assert_eq!(collector.total_count(), 2);
        assert_eq!(collector.shadow_count(), 2);
        assert_eq!(collector.shadows().len(), 1);
        assert_eq!(collector.measurable_total(), 0);
    }

    #[test]
    fn score_counts_timeouts_and_errors_as_detected() {
        let mut collector = Collector::new();
        collector.collect(result(Verdict::Timeout));
        collector.collect(result(Verdict::Error));
        collector.collect(result(Verdict::Escape));

        let totals = collector.totals();
        let score = totals.mutation_score().expect("measurable run should score");
        assert!((score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[derive(Debug, Clone)]
    enum Ingestion {
        Executed(Verdict),
        Shadow(bool),
    }

    fn ingestion_strategy() -> impl Strategy<Value = Ingestion> {
        prop_oneof![
            Just(Ingestion::Executed(Verdict::Timeout)),
            Just(Ingestion::Executed(Verdict::Error)),
            Just(Ingestion::Executed(Verdict::Kill)),
            Just(Ingestion::Executed(Verdict::Escape)),
            any::<bool>().prop_map(Ingestion::Shadow),
        ]
    }

    proptest! {
        #[test]
        fn totals_hold_for_any_sequence(
            calls in proptest::collection::vec(ingestion_strategy(), 0..64)
        ) {
            let mut collector = Collector::new();
            for call in &calls {
                match call {
                    Ingestion::Executed(verdict) => collector.collect(result(*verdict)),
                    Ingestion::Shadow(retained) => {
                        let m = retained.then(|| mutant("src/lib.rs", 1));
                        collector.collect_shadow(m);
                    }
                }
            }

            prop_assert_eq!(collector.total_count(), calls.len());
            prop_assert_eq!(
                collector.total_count(),
                collector.killed_count()
                    + collector.timeout_count()
                    + collector.error_count()
                    + collector.escape_count()
                    + collector.shadow_count()
            );
            prop_assert_eq!(
                collector.measurable_total() + collector.shadow_count(),
                collector.total_count()
            );
            prop_assert_eq!(
                collector.vanquished_total(),
                collector.killed_count() + collector.timeout_count() + collector.error_count()
            );
        }
    }
}
