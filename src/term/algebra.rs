//! Mergeability, merging and similarity of terms
//!
//! Two terms can merge when their fixed parts constrain the same variables
//! (polarities may differ in any number of positions), or when their group
//! lists are identical. Merging keeps the agreeing literals fixed and records
//! the disagreement as a new disjunctive group:
//!
//! ```text
//! merge((x0 x1 ~x2), (x0 ~x1 x2)) = (x0) * [(x1 ~x2) + (~x1 x2)]
//! ```
//!
//! Every assignment satisfying either input satisfies the result. Groups are
//! joined by covered-variable set: members of groups over the same variables
//! are unioned, a group only one side carries is dropped since the other side
//! places no constraint on those variables.

use super::{Group, Term, TermError, VarSet, DEFAULT_MAX_DEPTH};
use log::trace;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

impl Term {
    /// Check whether two terms may be merged
    ///
    /// Fails with [`TermError::WidthMismatch`] when the terms come from rows
    /// of different widths. The relation is symmetric.
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::Term;
    ///
    /// # fn main() -> Result<(), cube_merge::TermError> {
    /// let a = Term::from_bits("0110")?;
    /// let b = Term::from_bits("1011")?;
    /// assert!(a.can_merge(&b)?);
    /// assert!(b.can_merge(&a)?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn can_merge(&self, other: &Term) -> Result<bool, TermError> {
        self.check_width(other)?;
        Ok(self.is_mergeable(other))
    }

    /// Mergeability without the width check, for callers that validated widths up front
    pub(crate) fn is_mergeable(&self, other: &Term) -> bool {
        self.same_fixed_vars(other) || self.merged == other.merged
    }

    fn same_fixed_vars(&self, other: &Term) -> bool {
        self.fixed.len() == other.fixed.len() && self.fixed.keys().eq(other.fixed.keys())
    }

    pub(crate) fn check_width(&self, other: &Term) -> Result<(), TermError> {
        if self.width != other.width {
            return Err(TermError::WidthMismatch {
                left: self.width,
                right: other.width,
            });
        }
        Ok(())
    }

    /// Ranking score for a candidate merge
    ///
    /// Counts the variables fixed in both terms (regardless of polarity) plus
    /// the literal count of every group the two terms share unchanged.
    pub fn similarity(&self, other: &Term) -> usize {
        let shared_vars = self
            .fixed
            .keys()
            .filter(|var| other.fixed.contains_key(var))
            .count();
        let shared_groups: usize = self
            .merged
            .iter()
            .filter(|(vars, group)| other.merged.get(*vars) == Some(*group))
            .map(|(_, group)| group.size())
            .sum();
        shared_vars + shared_groups
    }

    /// Merge two terms using [`DEFAULT_MAX_DEPTH`] as the nesting bound
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::Term;
    ///
    /// # fn main() -> Result<(), cube_merge::TermError> {
    /// let a = Term::from_bits("0110")?;
    /// let b = Term::from_bits("0011")?;
    /// let merged = a.merge(&b)?;
    ///
    /// assert_eq!(merged.fixed_len(), 2);
    /// assert_eq!(merged.group_count(), 1);
    /// assert_eq!(merged.to_string(), "(~x0 x2) * [(~x1 x3) + (x1 ~x3)]");
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, other: &Term) -> Result<Term, TermError> {
        self.merge_bounded(other, DEFAULT_MAX_DEPTH)
    }

    /// Merge two terms, failing with [`TermError::InvalidState`] if the
    /// result nests groups deeper than `max_depth`
    ///
    /// The inputs are left untouched. No simplification is applied.
    pub fn merge_bounded(&self, other: &Term, max_depth: usize) -> Result<Term, TermError> {
        self.check_width(other)?;

        let mut common = BTreeMap::new();
        let mut only_self = BTreeMap::new();
        for (&var, &positive) in &self.fixed {
            match other.fixed.get(&var) {
                Some(&theirs) if theirs == positive => {
                    common.insert(var, positive);
                }
                _ => {
                    only_self.insert(var, positive);
                }
            }
        }
        let only_other: BTreeMap<usize, bool> = other
            .fixed
            .iter()
            .filter(|(var, _)| !common.contains_key(*var))
            .map(|(&var, &positive)| (var, positive))
            .collect();

        let mut merged = BTreeMap::new();
        for (vars, group) in &self.merged {
            if let Some(theirs) = other.merged.get(vars) {
                merged.insert(vars.clone(), group.union(theirs, self.width));
            }
        }

        // An empty side is the vacuous term, which would make the new group
        // always true.
        if !only_self.is_empty() && !only_other.is_empty() {
            let group = Group::any([
                Term::from_parts(self.width, only_self, BTreeMap::new()),
                Term::from_parts(self.width, only_other, BTreeMap::new()),
            ]);
            join_group(&mut merged, group, self.width);
        }

        let result = Term::from_parts(self.width, common, merged);
        let depth = result.depth();
        if depth > max_depth {
            return Err(TermError::InvalidState { depth, max_depth });
        }
        trace!("merge: {} + {} -> {}", self, other, result);
        Ok(result)
    }
}

/// Add `group` under its covered-variable set, unioning with an existing
/// group over the same variables
pub(crate) fn join_group(merged: &mut BTreeMap<VarSet, Group>, group: Group, width: usize) {
    match merged.entry(group.variables()) {
        Entry::Occupied(mut entry) => {
            let joined = entry.get().union(&group, width);
            entry.insert(joined);
        }
        Entry::Vacant(entry) => {
            entry.insert(group);
        }
    }
}
