//! Variable labels used when rendering terms
//!
//! This module provides the [`Labels`] type for naming input or output bit
//! positions, with generated names (`x0`, `x1`, ... / `y0`, `y1`, ...) for
//! positions that have no explicit label.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered labels for bit positions with a generated-name prefix
///
/// Maintains both ordered labels (Vec) and fast name->index lookup (HashMap).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labels<const PREFIX: char> {
    labels: Vec<Arc<str>>,
    label_map: HashMap<Arc<str>, usize>,
}

/// Labels for input (key) bits, generated as `x0`, `x1`, ...
pub type InputLabels = Labels<'x'>;

/// Labels for output (value) bits, generated as `y0`, `y1`, ...
pub type OutputLabels = Labels<'y'>;

impl<const PREFIX: char> Labels<PREFIX> {
    /// No explicit labels; every position uses its generated name
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            label_map: HashMap::new(),
        }
    }

    /// Create from explicit labels, position `i` named `labels[i]`
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<Arc<str>> = labels.into_iter().map(|s| Arc::from(s.as_ref())).collect();
        let label_map = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (Arc::clone(label), i))
            .collect();
        Self { labels, label_map }
    }

    /// `true` when no explicit labels were provided
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of explicit labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Explicit labels, in position order
    pub fn as_slice(&self) -> &[Arc<str>] {
        &self.labels
    }

    /// Name of position `index`, falling back to the generated name
    pub fn name(&self, index: usize) -> Cow<'_, str> {
        match self.labels.get(index) {
            Some(label) => Cow::Borrowed(label.as_ref()),
            None => Cow::Owned(format!("{}{}", PREFIX, index)),
        }
    }

    /// Find position by label name (O(1) lookup)
    pub fn find_position(&self, name: &str) -> Option<usize> {
        self.label_map.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names() {
        let labels = InputLabels::new();
        assert!(labels.is_empty());
        assert_eq!(labels.name(0), "x0");
        assert_eq!(labels.name(17), "x17");
        assert_eq!(OutputLabels::new().name(3), "y3");
    }

    #[test]
    fn test_explicit_names_with_fallback() {
        let labels = InputLabels::from_labels(["bkx1", "bkx0"]);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.name(0), "bkx1");
        assert_eq!(labels.name(1), "bkx0");
        assert_eq!(labels.name(2), "x2");
        assert_eq!(labels.find_position("bkx0"), Some(1));
        assert_eq!(labels.find_position("wrx0"), None);
    }
}
