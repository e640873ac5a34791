//! Local rewriting of degenerate groups
//!
//! Merging records every disagreement as an explicit disjunction, which
//! often leaves groups that are trivially true (`[x + ~x]`) or that spell out
//! an equivalence or exclusive-or of two variables. The simplifier removes
//! the former and folds the latter into [`Relation`] pseudo-literals. It never
//! changes the set of satisfying assignments and is idempotent.

use super::{Group, Relation, RelationKind, Term, VarSet};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Outcome of simplifying a single group
enum Rewrite {
    /// The group is always true and can be dropped
    Tautology,
    Keep(Group),
}

impl Term {
    /// Simplify this term's groups in place
    ///
    /// Members are simplified first (recursively), then each group is
    /// checked for tautology and for the equivalence/XOR patterns.
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::Term;
    ///
    /// # fn main() -> Result<(), cube_merge::TermError> {
    /// // [x1 + ~x1] is always true
    /// let mut t = Term::from_bits("01")?.merge(&Term::from_bits("00")?)?;
    /// assert_eq!(t.group_count(), 1);
    /// t.simplify();
    /// assert_eq!(t.group_count(), 0);
    /// assert_eq!(t.to_string(), "(~x0)");
    /// # Ok(())
    /// # }
    /// ```
    pub fn simplify(&mut self) {
        let width = self.width;
        let groups = std::mem::take(&mut self.merged);
        let mut kept: BTreeMap<VarSet, Group> = BTreeMap::new();
        for (vars, group) in groups {
            // Member simplification only touches nested groups, never fixed
            // literals, so the covered-variable set is preserved.
            match rewrite(group, width) {
                Rewrite::Tautology => {}
                Rewrite::Keep(group) => {
                    kept.insert(vars, group);
                }
            }
        }
        self.merged = kept;
    }

    /// Simplified copy of this term
    pub fn simplified(&self) -> Term {
        let mut term = self.clone();
        term.simplify();
        term
    }
}

fn rewrite(group: Group, width: usize) -> Rewrite {
    let members = match group {
        Group::Relation(_) => return Rewrite::Keep(group),
        Group::Any(members) => members,
    };

    let members: Vec<Term> = members
        .into_iter()
        .map(|m| Arc::unwrap_or_clone(m).simplified())
        .collect();

    if members.iter().any(Term::is_vacuous) || is_tautology(&members) {
        return Rewrite::Tautology;
    }
    if let Some(rel) = fold_relation(&members) {
        return Rewrite::Keep(Group::Relation(rel));
    }
    debug_assert!(members.iter().all(|m| m.width == width));
    Rewrite::Keep(Group::any(members))
}

/// Members are distinct full assignments over one variable set and there are
/// as many of them as assignments exist
fn is_tautology(members: &[Term]) -> bool {
    let Some(first) = members.first() else {
        return false;
    };
    let var_count = first.fixed.len();
    if var_count == 0 || var_count >= usize::BITS as usize {
        return false;
    }
    let uniform = members
        .iter()
        .all(|m| m.merged.is_empty() && m.fixed.keys().eq(first.fixed.keys()));
    if !uniform {
        return false;
    }
    let mut distinct: Vec<&BTreeMap<usize, bool>> = members.iter().map(|m| &m.fixed).collect();
    distinct.sort();
    distinct.dedup();
    distinct.len() == 1usize << var_count
}

/// Two complementary two-literal products: `[ab + ~a~b]` is `EQ(a, b)`,
/// `[a~b + ~ab]` is `XOR(a, b)`
fn fold_relation(members: &[Term]) -> Option<Relation> {
    let [first, second] = members else {
        return None;
    };
    if !first.merged.is_empty() || !second.merged.is_empty() {
        return None;
    }
    if first.fixed.len() != 2 || !first.fixed.keys().eq(second.fixed.keys()) {
        return None;
    }
    let mut vars = first.fixed.keys().copied();
    let (a, b) = (vars.next()?, vars.next()?);
    let complementary = first.fixed[&a] != second.fixed[&a] && first.fixed[&b] != second.fixed[&b];
    if !complementary {
        return None;
    }
    let kind = if first.fixed[&a] == first.fixed[&b] {
        RelationKind::Eq
    } else {
        RelationKind::Xor
    };
    Some(Relation::new(kind, a, b))
}
