//! Execution outcomes and their classification.

use serde::{Deserialize, Serialize};

use crate::mutant::Mutant;

/// Raw boolean signals reported by the test-suite executor for one mutant.
///
/// The executor owns process spawning, timeout enforcement, and exit-code
/// interpretation; by the time a result reaches this crate those concerns
/// are already condensed into these three flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionSignals {
    /// Execution did not complete within its time budget.
    pub timed_out: bool,
    /// Execution terminated abnormally outside the test runner's normal
    /// pass/fail reporting (crash, fatal runtime error, resource exhaustion).
    pub errored: bool,
    /// The test runner explicitly reported at least one failing test.
    pub killed: bool,
}

/// Terminal classification of one executed mutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Execution exceeded its time budget.
    Timeout,
    /// Execution terminated abnormally.
    Error,
    /// The test suite detected the mutation.
    Kill,
    /// The test suite passed despite the mutation.
    Escape,
}

impl Verdict {
    /// Classify executor signals into exactly one verdict.
    ///
    /// Checked in a fixed priority order, first match wins: timeout, then
    /// error, then kill, with escape as the default. Timeout and error are
    /// infrastructure-level signals and must not be reinterpreted as a kill
    /// or an escape even when the executor spuriously also reports a
    /// failure, so they are checked first.
    pub fn classify(signals: ExecutionSignals) -> Self {
        if signals.timed_out {
            Self::Timeout
        } else if signals.errored {
            Self::Error
        } else if signals.killed {
            Self::Kill
        } else {
            Self::Escape
        }
    }

    /// True for verdicts that count as detected when scoring a run
    /// (timeout, error, kill).
    pub fn is_detected(self) -> bool {
        !matches!(self, Self::Escape)
    }
}

/// Outcome of running the test suite against one mutant.
///
/// Immutable. The verdict is computed once at construction and cached, so
/// every consumer reads the same classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutantResult {
    mutant: Mutant,
    verdict: Verdict,
    stderr: String,
    #[serde(default)]
    stdout: Option<String>,
}

impl MutantResult {
    /// Build a result from executor signals and captured output.
    pub fn new(
        mutant: Mutant,
        signals: ExecutionSignals,
        stderr: String,
        stdout: Option<String>,
    ) -> Self {
        Self {
            mutant,
            verdict: Verdict::classify(signals),
            stderr,
            stdout,
        }
    }

    /// The mutant this outcome belongs to.
    pub fn mutant(&self) -> &Mutant {
        &self.mutant
    }

    /// Cached classification of this outcome.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// True if the execution timed out.
    pub fn is_timeout(&self) -> bool {
        self.verdict == Verdict::Timeout
    }

    /// True if the execution terminated abnormally.
    pub fn is_error(&self) -> bool {
        self.verdict == Verdict::Error
    }

    /// True if the test suite detected the mutation.
    pub fn is_kill(&self) -> bool {
        self.verdict == Verdict::Kill
    }

    /// Full captured standard error.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Full captured standard output, when retained.
    pub fn stdout(&self) -> Option<&str> {
        self.stdout.as_deref()
    }
}
