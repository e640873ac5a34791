//! Evaluation of terms under concrete assignments

use super::{Group, Relation, RelationKind, Term, TermError};

impl Term {
    /// Evaluate the term under a full assignment
    ///
    /// `assignment[i]` is the value of variable `i`. Variables beyond the end
    /// of the slice read as `false`.
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        let value = |var: usize| assignment.get(var).copied().unwrap_or(false);
        self.fixed.iter().all(|(&var, &positive)| value(var) == positive)
            && self.merged.values().all(|group| group.evaluate(assignment))
    }

    /// Check whether a `0`/`1` row satisfies the term
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::Term;
    ///
    /// # fn main() -> Result<(), cube_merge::TermError> {
    /// let t = Term::from_bits("10")?.merge(&Term::from_bits("11")?)?;
    /// assert!(t.covers("10")?);
    /// assert!(t.covers("11")?);
    /// assert!(!t.covers("00")?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn covers(&self, bits: &str) -> Result<bool, TermError> {
        let assignment = parse_row(bits)?;
        if assignment.len() != self.width {
            return Err(TermError::WidthMismatch {
                left: self.width,
                right: assignment.len(),
            });
        }
        Ok(self.evaluate(&assignment))
    }
}

impl Group {
    /// Evaluate the disjunction under a full assignment
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        match self {
            Group::Any(members) => members.iter().any(|m| m.evaluate(assignment)),
            Group::Relation(rel) => rel.evaluate(assignment),
        }
    }
}

impl Relation {
    pub fn evaluate(&self, assignment: &[bool]) -> bool {
        let (l, r) = self.vars();
        let value = |var: usize| assignment.get(var).copied().unwrap_or(false);
        match self.kind() {
            RelationKind::Eq => value(l) == value(r),
            RelationKind::Xor => value(l) != value(r),
        }
    }
}

pub(crate) fn parse_row(bits: &str) -> Result<Vec<bool>, TermError> {
    bits.chars()
        .enumerate()
        .map(|(position, character)| match character {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(TermError::InvalidEncoding {
                character,
                position,
            }),
        })
        .collect()
}
