//! Display formatting for terms
//!
//! The fixed part renders as a parenthesised implicit AND of literals in
//! variable order (`~` marks a negative literal). Each group renders as a
//! bracketed OR of its members, and groups are conjoined with `*` after the
//! fixed part:
//!
//! ```text
//! (x0 ~x2) * [(x1 ~x3) + (~x1 x3)] * (x4 == x5)
//! ```
//!
//! The term with neither fixed literals nor groups renders as `empty`.

use super::{Group, InputLabels, RelationKind, Term};
use std::fmt;

/// A term paired with the labels used to name its variables
///
/// Created by [`Term::display_with`].
pub struct TermDisplay<'a> {
    term: &'a Term,
    labels: &'a InputLabels,
}

impl Term {
    /// Render with explicit variable labels
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::{InputLabels, Term};
    ///
    /// # fn main() -> Result<(), cube_merge::TermError> {
    /// let labels = InputLabels::from_labels(["up", "down"]);
    /// let term = Term::from_bits("10")?;
    /// assert_eq!(term.display_with(&labels).to_string(), "(up ~down)");
    /// # Ok(())
    /// # }
    /// ```
    pub fn display_with<'a>(&'a self, labels: &'a InputLabels) -> TermDisplay<'a> {
        TermDisplay { term: self, labels }
    }

    fn fmt_labelled(&self, f: &mut fmt::Formatter<'_>, labels: &InputLabels) -> fmt::Result {
        if self.is_vacuous() {
            return write!(f, "empty");
        }

        let mut first = true;
        if !self.fixed.is_empty() {
            write!(f, "(")?;
            for (i, lit) in self.fixed().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                if !lit.is_positive() {
                    write!(f, "~")?;
                }
                write!(f, "{}", labels.name(lit.var()))?;
            }
            write!(f, ")")?;
            first = false;
        }

        for group in self.merged.values() {
            if !first {
                write!(f, " * ")?;
            }
            first = false;
            group.fmt_labelled(f, labels)?;
        }
        Ok(())
    }
}

impl Group {
    fn fmt_labelled(&self, f: &mut fmt::Formatter<'_>, labels: &InputLabels) -> fmt::Result {
        match self {
            Group::Any(members) => {
                write!(f, "[")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    member.fmt_labelled(f, labels)?;
                }
                write!(f, "]")
            }
            Group::Relation(rel) => {
                let (l, r) = rel.vars();
                let op = match rel.kind() {
                    RelationKind::Eq => "==",
                    RelationKind::Xor => "^",
                };
                write!(f, "({} {} {})", labels.name(l), op, labels.name(r))
            }
        }
    }
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.term.fmt_labelled(f, self.labels)
    }
}

/// Display using generated variable names (`x0`, `x1`, ...)
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_labelled(f, &InputLabels::new())
    }
}
