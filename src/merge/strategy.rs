//! Pass strategies for the pairwise merger
//!
//! Both strategies only merge pairs that are mergeable and have a positive
//! similarity score. Ties keep the first candidate found. A consumed entry is
//! removed by moving the last element into its slot, so list order is not
//! preserved across passes.

use crate::term::{Term, TermError};
use log::trace;

/// How a single pass chooses pairs to merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassStrategy {
    /// For each row in turn, merge it with its most similar partner to the
    /// right. Many merges per O(n²) pass.
    #[default]
    GreedyPerRow,
    /// Merge only the single most similar pair in the whole list. One merge
    /// per O(n²) pass; only practical for small tables.
    GlobalBest,
}

impl PassStrategy {
    /// Run one pass over `terms`, returning the number of merges performed
    pub(crate) fn run_pass(
        self,
        terms: &mut Vec<Term>,
        max_depth: usize,
    ) -> Result<usize, TermError> {
        match self {
            PassStrategy::GreedyPerRow => greedy_per_row(terms, max_depth),
            PassStrategy::GlobalBest => global_best(terms, max_depth),
        }
    }
}

/// Index of the most similar mergeable partner of `terms[i]` among `j > i`
fn best_partner(terms: &[Term], i: usize) -> Option<usize> {
    let mut best_score = 0;
    let mut best = None;
    for j in i + 1..terms.len() {
        if !terms[i].is_mergeable(&terms[j]) {
            continue;
        }
        let score = terms[i].similarity(&terms[j]);
        if score > best_score {
            best_score = score;
            best = Some(j);
        }
    }
    best
}

fn greedy_per_row(terms: &mut Vec<Term>, max_depth: usize) -> Result<usize, TermError> {
    let mut merges = 0;
    let mut i = 0;
    while i + 1 < terms.len() {
        if let Some(j) = best_partner(terms, i) {
            let merged = terms[i].merge_bounded(&terms[j], max_depth)?;
            trace!("greedy: merged rows {} and {}", i, j);
            terms[i] = merged;
            terms.swap_remove(j);
            merges += 1;
        }
        i += 1;
    }
    Ok(merges)
}

fn global_best(terms: &mut Vec<Term>, max_depth: usize) -> Result<usize, TermError> {
    let mut best_score = 0;
    let mut best = None;
    for i in 0..terms.len().saturating_sub(1) {
        for j in i + 1..terms.len() {
            if !terms[i].is_mergeable(&terms[j]) {
                continue;
            }
            let score = terms[i].similarity(&terms[j]);
            if score > best_score {
                best_score = score;
                best = Some((i, j));
            }
        }
    }

    let Some((i, j)) = best else {
        return Ok(0);
    };
    let merged = terms[i].merge_bounded(&terms[j], max_depth)?;
    trace!("global: merged rows {} and {} (similarity {})", i, j, best_score);
    terms[i] = merged;
    terms.swap_remove(j);
    Ok(1)
}
