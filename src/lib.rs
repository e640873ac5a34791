//! # Cube Merge
//!
//! A heuristic two-level Boolean minimizer. Given a truth table of
//! fixed-width bit strings, it builds a compact expression equivalent to the
//! rows by greedily merging compatible terms until nothing more merges, as a
//! home-grown alternative to handing the table to an exact minimizer.
//!
//! ## Overview
//!
//! ```text
//! bit strings -> TermEncoder -> [Term] -> PairwiseMerger (passes to fixed point)
//!             -> Simplifier -> Display
//! ```
//!
//! - [`Term`] generalises a cube into a product of sums of products: a set of
//!   fixed literals plus disjunctive groups recording where merged rows
//!   disagreed.
//! - [`PairwiseMerger`] repeatedly merges the most similar mergeable pairs.
//! - [`Term::simplify`] removes tautological groups and folds two-variable
//!   equivalence / exclusive-or patterns.
//! - [`TruthTable`] and [`minimize_table`] minimize each output bit of a table
//!   independently.
//!
//! ## Minimizing rows
//!
//! ```
//! use cube_merge::{Budget, MergeConfig, PairwiseMerger};
//!
//! # fn main() -> Result<(), cube_merge::TermError> {
//! let rows = ["1100", "1101", "1110", "1111"];
//! let outcome = PairwiseMerger::from_rows(rows, MergeConfig::default())?
//!     .run(&Budget::unlimited())?;
//!
//! assert!(outcome.is_complete());
//! assert!(rows.iter().all(|r| outcome.covers(r).unwrap()));
//! println!("{} terms", outcome.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Minimizing a table
//!
//! ```
//! use cube_merge::{minimize_table, Budget, MergeConfig, TruthTable};
//!
//! # fn main() -> Result<(), cube_merge::TableError> {
//! let table = TruthTable::from_rows([("00", "1"), ("01", "1"), ("10", "0"), ("11", "0")])?;
//! let outcomes = minimize_table(&table, &MergeConfig::default(), &Budget::unlimited())?;
//!
//! assert_eq!(outcomes.len(), 1);
//! assert_eq!(outcomes[0].terms()[0].to_string(), "(~x0)");
//! # Ok(())
//! # }
//! ```
//!
//! ## Partial results
//!
//! A [`Budget`] bounds a run by deadline, pass count or a [`CancelToken`].
//! When it runs out the current terms are returned with
//! [`Completion::Partial`]; they still cover every input row, they are just
//! not merged as far as they could be.

pub mod error;
pub mod merge;
pub mod pla;
pub mod table;
pub mod term;

pub use error::MinimizeError;
pub use merge::{
    Budget, CancelToken, Completion, Interruption, MergeOutcome, PairwiseMerger, PassReport,
    PassStrategy,
};
pub use pla::{PLAReader, PLAType, PLAWriter};
pub use table::chess::{
    read_state_file, read_state_pairs, BoardConfig, ChessState, MoveEncoder, Square, StatePair,
};
pub use table::{minimize_output, minimize_table, OutputPattern, TableError, TruthTable};
pub use term::{
    Group, InputLabels, Labels, Literal, OutputLabels, Relation, RelationKind, Term, TermEncoder,
    TermError, DEFAULT_MAX_DEPTH,
};

/// Configuration for the pairwise merger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Pair selection per pass
    pub strategy: PassStrategy,
    /// Maximum group nesting depth a merge may produce
    pub max_depth: usize,
    /// Simplify every term after each pass
    pub simplify_each_pass: bool,
    /// Simplify every term of the final result
    pub simplify_output: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            strategy: PassStrategy::GreedyPerRow,
            max_depth: DEFAULT_MAX_DEPTH,
            simplify_each_pass: false,
            simplify_output: true,
        }
    }
}

impl MergeConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: PassStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_simplify_each_pass(mut self, enabled: bool) -> Self {
        self.simplify_each_pass = enabled;
        self
    }

    pub fn with_simplify_output(mut self, enabled: bool) -> Self {
        self.simplify_output = enabled;
        self
    }
}
