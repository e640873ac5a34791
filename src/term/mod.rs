//! Terms: the recursive product-of-sums structure the merger works on
//!
//! A [`Term`] generalises a product term (cube). It holds a conjunction of
//! fixed [`Literal`]s together with a list of disjunctive [`Group`]s:
//!
//! ```text
//! (AND of fixed) AND (AND over groups of (OR of the group's members))
//! ```
//!
//! Terms are created by a [`TermEncoder`] (one per truth-table row) and
//! afterwards only produced by [`Term::merge`], which always allocates a new
//! term. Groups are stored in a map keyed by the set of variables they cover,
//! so two groups over the same variables can never coexist in one term and
//! structural equality is independent of insertion order.

mod algebra;
mod display;
mod encode;
mod error;
pub(crate) mod eval;
mod labels;
mod simplify;


pub use display::TermDisplay;
pub use encode::TermEncoder;
pub use error::TermError;
pub use labels::{InputLabels, Labels, OutputLabels};

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Default bound on group nesting enforced by [`Term::merge`]
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Sorted, duplicate-free set of variable indices covered by a group
pub type VarSet = Box<[usize]>;

/// A variable index paired with a polarity
///
/// Variable indices are positions in the fixed-width bit string the term was
/// encoded from. A positive literal requires the bit to be `1`, a negative
/// one requires `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    var: usize,
    positive: bool,
}

impl Literal {
    /// Create a literal over `var`
    pub fn new(var: usize, positive: bool) -> Self {
        Literal { var, positive }
    }

    /// Variable index of this literal
    pub fn var(&self) -> usize {
        self.var
    }

    /// `true` if the literal requires the variable to be `1`
    pub fn is_positive(&self) -> bool {
        self.positive
    }
}

/// Two-variable relation produced by the simplifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationKind {
    /// Both variables carry the same value
    Eq,
    /// The variables carry different values
    Xor,
}

/// Pseudo-literal standing for an equivalence or exclusive-or of two variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Relation {
    kind: RelationKind,
    left: usize,
    right: usize,
}

impl Relation {
    /// Create a relation between two distinct variables
    ///
    /// The variables are stored in ascending order; `EQ(a, b)` and `EQ(b, a)`
    /// are the same relation.
    pub fn new(kind: RelationKind, a: usize, b: usize) -> Self {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        Relation { kind, left, right }
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// The two related variables, lowest index first
    pub fn vars(&self) -> (usize, usize) {
        (self.left, self.right)
    }

    /// Expand into the two product terms the relation abbreviates
    pub(crate) fn members(&self, width: usize) -> [Term; 2] {
        let (l, r) = (self.left, self.right);
        match self.kind {
            RelationKind::Eq => [
                Term::with_fixed(width, [(l, false), (r, false)]),
                Term::with_fixed(width, [(l, true), (r, true)]),
            ],
            RelationKind::Xor => [
                Term::with_fixed(width, [(l, false), (r, true)]),
                Term::with_fixed(width, [(l, true), (r, false)]),
            ],
        }
    }
}

/// One disjunctive group of a term's `merged` part
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    /// OR of the member terms (never empty)
    Any(BTreeSet<Arc<Term>>),
    /// An `EQ`/`XOR` pseudo-literal left behind by simplification
    Relation(Relation),
}

impl Group {
    /// Build a disjunction from member terms, dropping duplicates
    pub(crate) fn any<I: IntoIterator<Item = Term>>(members: I) -> Self {
        Group::Any(members.into_iter().map(Arc::new).collect())
    }

    /// Covered-variable set: the union of the members' fixed variables
    pub fn variables(&self) -> VarSet {
        match self {
            Group::Any(members) => members
                .iter()
                .flat_map(|m| m.fixed.keys().copied())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            Group::Relation(rel) => {
                let (l, r) = rel.vars();
                vec![l, r].into_boxed_slice()
            }
        }
    }

    /// Number of members (a relation counts as its two products)
    pub fn len(&self) -> usize {
        match self {
            Group::Any(members) => members.len(),
            Group::Relation(_) => 2,
        }
    }

    /// Always `false`: groups are never empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Member terms, if this is a plain disjunction
    pub fn members(&self) -> Option<impl Iterator<Item = &Term>> {
        match self {
            Group::Any(members) => Some(members.iter().map(|m| m.as_ref())),
            Group::Relation(_) => None,
        }
    }

    /// Total literal count, counted recursively through nested groups
    ///
    /// A relation counts as the four literals of its two products.
    pub fn size(&self) -> usize {
        match self {
            Group::Any(members) => members.iter().map(|m| m.size()).sum(),
            Group::Relation(_) => 4,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        match self {
            Group::Any(members) => members.iter().map(|m| m.depth()).max().unwrap_or(0),
            Group::Relation(_) => 0,
        }
    }

    /// Members of this group as shared terms, expanding relations
    pub(crate) fn into_member_set(self, width: usize) -> BTreeSet<Arc<Term>> {
        match self {
            Group::Any(members) => members,
            Group::Relation(rel) => rel.members(width).into_iter().map(Arc::new).collect(),
        }
    }

    /// Union of the members of two groups over the same variable set
    pub(crate) fn union(&self, other: &Group, width: usize) -> Group {
        if self == other {
            return self.clone();
        }
        let mut members = self.clone().into_member_set(width);
        members.extend(other.clone().into_member_set(width));
        Group::Any(members)
    }
}

/// A product of sums of products over a fixed-width variable space
///
/// # Examples
///
/// ```
/// use cube_merge::TermEncoder;
///
/// # fn main() -> Result<(), cube_merge::TermError> {
/// let encoder = TermEncoder::new(3);
/// let term = encoder.encode("101")?;
///
/// assert_eq!(term.width(), 3);
/// assert_eq!(term.fixed_len(), 3);
/// assert_eq!(term.literal(1), Some(false));
/// assert_eq!(term.to_string(), "(x0 ~x1 x2)");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    /// Bit width of the rows this term was derived from
    width: usize,
    /// Variable index -> polarity; at most one literal per variable
    fixed: BTreeMap<usize, bool>,
    /// Disjunctive groups keyed by their covered-variable set
    merged: BTreeMap<VarSet, Group>,
}

impl Term {
    /// The vacuous (always true) term over `width` variables
    pub fn vacuous(width: usize) -> Self {
        Term {
            width,
            fixed: BTreeMap::new(),
            merged: BTreeMap::new(),
        }
    }

    /// Build a term from a set of literals
    ///
    /// Returns `None` if two literals disagree on the same variable, or if a
    /// literal lies outside `width`.
    pub fn from_literals<I: IntoIterator<Item = Literal>>(
        width: usize,
        literals: I,
    ) -> Option<Self> {
        let mut fixed = BTreeMap::new();
        for lit in literals {
            if lit.var >= width {
                return None;
            }
            if let Some(prev) = fixed.insert(lit.var, lit.positive) {
                if prev != lit.positive {
                    return None;
                }
            }
        }
        Some(Term {
            width,
            fixed,
            merged: BTreeMap::new(),
        })
    }

    pub(crate) fn with_fixed<I: IntoIterator<Item = (usize, bool)>>(
        width: usize,
        fixed: I,
    ) -> Self {
        Term {
            width,
            fixed: fixed.into_iter().collect(),
            merged: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(
        width: usize,
        fixed: BTreeMap<usize, bool>,
        merged: BTreeMap<VarSet, Group>,
    ) -> Self {
        Term {
            width,
            fixed,
            merged,
        }
    }

    /// Bit width of the variable space
    pub fn width(&self) -> usize {
        self.width
    }

    /// Fixed literals in ascending variable order
    pub fn fixed(&self) -> impl Iterator<Item = Literal> + '_ {
        self.fixed.iter().map(|(&var, &positive)| Literal { var, positive })
    }

    /// Number of fixed literals
    pub fn fixed_len(&self) -> usize {
        self.fixed.len()
    }

    /// Polarity of the fixed literal over `var`, if any
    pub fn literal(&self, var: usize) -> Option<bool> {
        self.fixed.get(&var).copied()
    }

    /// Variables constrained by the fixed part
    pub fn fixed_vars(&self) -> impl Iterator<Item = usize> + '_ {
        self.fixed.keys().copied()
    }

    /// Disjunctive groups, ordered by covered-variable set
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.merged.values()
    }

    /// Group covering exactly `vars`, if present
    pub fn group(&self, vars: &[usize]) -> Option<&Group> {
        self.merged.get(vars)
    }

    /// Number of disjunctive groups
    pub fn group_count(&self) -> usize {
        self.merged.len()
    }

    /// `true` for the term with neither fixed literals nor groups
    pub fn is_vacuous(&self) -> bool {
        self.fixed.is_empty() && self.merged.is_empty()
    }

    /// Total literal count: fixed literals plus every group member, recursively
    pub fn size(&self) -> usize {
        self.fixed.len() + self.merged.values().map(Group::size).sum::<usize>()
    }

    /// Nesting depth of the group structure (0 for a plain cube)
    pub fn depth(&self) -> usize {
        if self.merged.is_empty() {
            0
        } else {
            1 + self.merged.values().map(Group::depth).max().unwrap_or(0)
        }
    }
}
