//! Pairwise merging of a term list to a fixed point
//!
//! The [`PairwiseMerger`] owns the active term list of one minimization
//! session. It runs passes of the configured [`PassStrategy`] until a pass
//! leaves the list length unchanged, or until the [`Budget`] runs out, in
//! which case the current list is returned as an explicitly partial result.
//! The function represented is the OR of all terms in the list.
//!
//! Every pass is O(n²) comparisons and each productive pass shrinks the list,
//! so the number of passes is bounded by the initial row count.

mod budget;
mod strategy;


pub use budget::{Budget, CancelToken, Interruption};
pub use strategy::PassStrategy;

use crate::term::{Term, TermEncoder, TermError};
use crate::MergeConfig;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A pass made no merge: the list is stable
    FixedPoint,
    /// The run stopped early; the terms are still a sound cover of the input
    Partial(Interruption),
}

/// Report for a single pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// List length before the pass
    pub before: usize,
    /// List length after the pass
    pub after: usize,
    /// Merges performed
    pub merges: usize,
}

/// Result of a minimization run
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    terms: Vec<Term>,
    completion: Completion,
    initial_len: usize,
    passes: usize,
    merges: usize,
    elapsed: Duration,
}

impl MergeOutcome {
    /// Final terms; the function is their OR
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// `true` if the run reached a fixed point
    pub fn is_complete(&self) -> bool {
        self.completion == Completion::FixedPoint
    }

    /// Number of terms before the first pass
    pub fn initial_len(&self) -> usize {
        self.initial_len
    }

    /// Number of terms in the result
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Passes run, including the final unproductive one
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Total merges across all passes
    pub fn merges(&self) -> usize {
        self.merges
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Sum of [`Term::size`] over the result
    pub fn literal_count(&self) -> usize {
        self.terms.iter().map(Term::size).sum()
    }

    /// Evaluate the OR of all terms under a full assignment
    ///
    /// Fails with [`TermError::WidthMismatch`] unless `assignment` has exactly
    /// one value per variable.
    pub fn evaluate(&self, assignment: &[bool]) -> Result<bool, TermError> {
        if let Some(term) = self.terms.iter().find(|t| t.width() != assignment.len()) {
            return Err(TermError::WidthMismatch {
                left: term.width(),
                right: assignment.len(),
            });
        }
        Ok(self.terms.iter().any(|t| t.evaluate(assignment)))
    }

    /// Check whether any term covers the `0`/`1` row
    pub fn covers(&self, bits: &str) -> Result<bool, TermError> {
        for term in &self.terms {
            if term.covers(bits)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Greedy pairwise term merger for one minimization session
///
/// # Examples
///
/// ```
/// use cube_merge::{Budget, MergeConfig, PairwiseMerger};
///
/// # fn main() -> Result<(), cube_merge::TermError> {
/// // x1 does not matter when x0 is 0
/// let merger = PairwiseMerger::from_rows(["00", "01"], MergeConfig::default())?;
/// let outcome = merger.run(&Budget::unlimited())?;
///
/// assert!(outcome.is_complete());
/// assert_eq!(outcome.len(), 1);
/// assert_eq!(outcome.terms()[0].to_string(), "(~x0)");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PairwiseMerger {
    terms: Vec<Term>,
    config: MergeConfig,
    initial_len: usize,
    passes: usize,
    merges: usize,
}

impl PairwiseMerger {
    /// Start a session over `terms`
    ///
    /// All terms must share one width; otherwise this fails with
    /// [`TermError::WidthMismatch`] before any comparison runs.
    pub fn new(terms: Vec<Term>, config: MergeConfig) -> Result<Self, TermError> {
        if let Some(first) = terms.first() {
            for term in &terms[1..] {
                first.check_width(term)?;
            }
        }
        Ok(PairwiseMerger {
            initial_len: terms.len(),
            terms,
            config,
            passes: 0,
            merges: 0,
        })
    }

    /// Encode `rows` and start a session over them
    ///
    /// The width is taken from the first row.
    pub fn from_rows<'a, I>(rows: I, config: MergeConfig) -> Result<Self, TermError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rows = rows.into_iter().peekable();
        let width = rows.peek().map_or(0, |r| r.chars().count());
        let terms = TermEncoder::new(width).encode_all(rows)?;
        Self::new(terms, config)
    }

    /// Current term list
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Passes run so far
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Run a single pass of the configured strategy
    pub fn run_pass(&mut self) -> Result<PassReport, TermError> {
        let before = self.terms.len();
        let merges = self
            .config
            .strategy
            .run_pass(&mut self.terms, self.config.max_depth)?;
        if self.config.simplify_each_pass {
            self.terms.iter_mut().for_each(Term::simplify);
        }
        self.passes += 1;
        self.merges += merges;

        let report = PassReport {
            before,
            after: self.terms.len(),
            merges,
        };
        debug!(
            "pass {}: {} -> {} terms ({} merges)",
            self.passes, report.before, report.after, report.merges
        );
        Ok(report)
    }

    /// Run passes until the list stops shrinking or the budget runs out
    pub fn minimize(&mut self, budget: &Budget) -> Result<Completion, TermError> {
        loop {
            if let Some(reason) = budget.check(self.passes) {
                warn!(
                    "stopping after {} passes with {} terms: {}",
                    self.passes,
                    self.terms.len(),
                    reason
                );
                return Ok(Completion::Partial(reason));
            }
            let report = self.run_pass()?;
            if report.after == report.before {
                return Ok(Completion::FixedPoint);
            }
        }
    }

    /// Run to completion and package the result
    ///
    /// Applies the simplifier to every output term when
    /// [`MergeConfig::simplify_output`] is set.
    pub fn run(mut self, budget: &Budget) -> Result<MergeOutcome, TermError> {
        let start = Instant::now();
        info!(
            "merging {} terms with {:?}",
            self.terms.len(),
            self.config.strategy
        );
        let completion = self.minimize(budget)?;
        let outcome = self.into_outcome(completion, start.elapsed());
        info!(
            "finished: {} -> {} terms in {} passes ({:?}, {:?})",
            outcome.initial_len,
            outcome.len(),
            outcome.passes,
            outcome.completion,
            outcome.elapsed
        );
        Ok(outcome)
    }

    fn into_outcome(mut self, completion: Completion, elapsed: Duration) -> MergeOutcome {
        if self.config.simplify_output {
            self.terms.iter_mut().for_each(Term::simplify);
        }
        MergeOutcome {
            terms: self.terms,
            completion,
            initial_len: self.initial_len,
            passes: self.passes,
            merges: self.merges,
            elapsed,
        }
    }
}
