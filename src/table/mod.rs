//! Truth tables and per-output minimization
//!
//! A [`TruthTable`] maps fixed-width input bit strings to fixed-width output
//! bit strings. Each output bit is minimized on its own: the rows where the bit
//! is `1` form its ON-set, which is encoded into terms and merged to a fixed
//! point. Outputs are never optimized jointly.

pub mod chess;
mod error;

pub use error::TableError;

use crate::merge::{Budget, MergeOutcome, PairwiseMerger};
use crate::term::eval::parse_row;
use crate::term::{InputLabels, OutputLabels, TermEncoder};
use crate::MergeConfig;
use log::info;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Mapping from input bit strings to output bit strings
///
/// Rows are kept sorted by key, so iteration and minimization are
/// deterministic. Inserting an existing key replaces its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    input_width: usize,
    output_width: usize,
    rows: BTreeMap<Box<str>, Box<str>>,
    input_labels: InputLabels,
    output_labels: OutputLabels,
}

impl TruthTable {
    /// Create an empty table with the given widths
    pub fn new(input_width: usize, output_width: usize) -> Self {
        TruthTable {
            input_width,
            output_width,
            rows: BTreeMap::new(),
            input_labels: InputLabels::new(),
            output_labels: OutputLabels::new(),
        }
    }

    /// Build a table from `(key, value)` rows, taking widths from the first row
    pub fn from_rows<I, K, V>(rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut rows = rows.into_iter().peekable();
        let (inputs, outputs) = rows.peek().map_or((0, 0), |(k, v)| {
            (k.as_ref().chars().count(), v.as_ref().chars().count())
        });
        let mut table = TruthTable::new(inputs, outputs);
        for (key, value) in rows {
            table.insert(key.as_ref(), value.as_ref())?;
        }
        Ok(table)
    }

    /// Attach variable labels used when rendering and writing the table
    pub fn with_labels(mut self, inputs: InputLabels, outputs: OutputLabels) -> Self {
        self.input_labels = inputs;
        self.output_labels = outputs;
        self
    }

    /// Insert a row, returning the value it replaced
    pub fn insert(&mut self, key: &str, value: &str) -> Result<Option<Box<str>>, TableError> {
        if key.chars().count() != self.input_width || value.chars().count() != self.output_width {
            return Err(TableError::InconsistentWidth {
                key: key.to_string(),
                value: value.to_string(),
                inputs: self.input_width,
                outputs: self.output_width,
            });
        }
        parse_row(key)?;
        parse_row(value)?;
        Ok(self.rows.insert(key.into(), value.into()))
    }

    pub fn input_width(&self) -> usize {
        self.input_width
    }

    pub fn output_width(&self) -> usize {
        self.output_width
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn input_labels(&self) -> &InputLabels {
        &self.input_labels
    }

    pub fn output_labels(&self) -> &OutputLabels {
        &self.output_labels
    }

    /// Value stored for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.rows.get(key).map(|v| v.as_ref())
    }

    /// Rows in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    /// Keys whose output bit `bit` is `1`
    pub fn on_set(&self, bit: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter(move |(_, v)| v.as_bytes().get(bit) == Some(&b'1'))
            .map(|(k, _)| k.as_ref())
    }

    /// Rows whose value matches `pattern`
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::{OutputPattern, TruthTable};
    ///
    /// # fn main() -> Result<(), cube_merge::TableError> {
    /// let table = TruthTable::from_rows([("00", "10"), ("01", "11"), ("10", "01")])?;
    /// let pattern: OutputPattern = "1.".parse()?;
    /// let filtered = table.filter(&pattern)?;
    /// assert_eq!(filtered.len(), 2);
    /// assert_eq!(filtered.get("10"), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, pattern: &OutputPattern) -> Result<TruthTable, TableError> {
        if pattern.width() != self.output_width {
            return Err(TableError::PatternWidthMismatch {
                pattern: pattern.width(),
                outputs: self.output_width,
            });
        }
        let rows = self
            .rows
            .iter()
            .filter(|(_, v)| pattern.matches(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(TruthTable {
            rows,
            ..self.clone_empty()
        })
    }

    fn clone_empty(&self) -> TruthTable {
        TruthTable {
            input_width: self.input_width,
            output_width: self.output_width,
            rows: BTreeMap::new(),
            input_labels: self.input_labels.clone(),
            output_labels: self.output_labels.clone(),
        }
    }
}

/// Output filter of `0`, `1` and wildcard (`.` or `-`) positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPattern(Box<[Option<bool>]>);

impl OutputPattern {
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// `true` if `value` has the pattern's width and agrees on every fixed position
    pub fn matches(&self, value: &str) -> bool {
        value.chars().count() == self.0.len()
            && value.chars().zip(self.0.iter()).all(|(c, want)| match want {
                None => true,
                Some(true) => c == '1',
                Some(false) => c == '0',
            })
    }
}

impl FromStr for OutputPattern {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(Some(false)),
                '1' => Ok(Some(true)),
                '.' | '-' => Ok(None),
                _ => Err(TableError::InvalidPattern {
                    character,
                    position,
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|bits| OutputPattern(bits.into_boxed_slice()))
    }
}

/// Minimize a single output bit of `table`
pub fn minimize_output(
    table: &TruthTable,
    bit: usize,
    config: &MergeConfig,
    budget: &Budget,
) -> Result<MergeOutcome, TableError> {
    if bit >= table.output_width() {
        return Err(TableError::OutputOutOfRange {
            requested: bit,
            outputs: table.output_width(),
        });
    }
    let encoder = TermEncoder::new(table.input_width());
    let terms = encoder.encode_all(table.on_set(bit))?;
    info!(
        "output {} ({}): {} of {} rows set",
        bit,
        table.output_labels().name(bit),
        terms.len(),
        table.len()
    );
    let merger = PairwiseMerger::new(terms, config.clone())?;
    Ok(merger.run(budget)?)
}

/// Minimize every output bit of `table` independently
///
/// Returns one outcome per output bit, in bit order. A shared deadline in
/// `budget` bounds the whole table, not each bit.
pub fn minimize_table(
    table: &TruthTable,
    config: &MergeConfig,
    budget: &Budget,
) -> Result<Vec<MergeOutcome>, TableError> {
    (0..table.output_width())
        .map(|bit| minimize_output(table, bit, config, budget))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Literal, TermError};

    #[test]
    fn test_from_rows_infers_widths() {
        let table = TruthTable::from_rows([("000", "01"), ("111", "10")]).unwrap();
        assert_eq!(table.input_width(), 3);
        assert_eq!(table.output_width(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("111"), Some("10"));
    }

    #[test]
    fn test_insert_replaces_existing_row() {
        let mut table = TruthTable::new(2, 1);
        assert_eq!(table.insert("01", "0").unwrap(), None);
        assert_eq!(table.insert("01", "1").unwrap().as_deref(), Some("0"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_insert_rejects_bad_rows() {
        let mut table = TruthTable::new(2, 1);
        assert!(matches!(
            table.insert("011", "1"),
            Err(TableError::InconsistentWidth { .. })
        ));
        assert!(matches!(
            table.insert("0x", "1"),
            Err(TableError::Term(TermError::InvalidEncoding { character: 'x', .. }))
        ));
        assert!(matches!(
            table.insert("01", "-"),
            Err(TableError::Term(TermError::InvalidEncoding { character: '-', .. }))
        ));
    }

    #[test]
    fn test_on_set() {
        let table = TruthTable::from_rows([("00", "10"), ("01", "11"), ("10", "01")]).unwrap();
        assert_eq!(table.on_set(0).collect::<Vec<_>>(), vec!["00", "01"]);
        assert_eq!(table.on_set(1).collect::<Vec<_>>(), vec!["01", "10"]);
        assert_eq!(table.on_set(2).count(), 0);
    }

    #[test]
    fn test_output_pattern_parsing() {
        let pattern: OutputPattern = "1..1-0".parse().unwrap();
        assert_eq!(pattern.width(), 6);
        assert!(pattern.matches("100100"));
        assert!(pattern.matches("111110"));
        assert!(!pattern.matches("011100"));
        assert!(!pattern.matches("10010"));

        let err = "1x".parse::<OutputPattern>().unwrap_err();
        assert!(matches!(
            err,
            TableError::InvalidPattern {
                character: 'x',
                position: 1
            }
        ));
    }

    #[test]
    fn test_filter_width_must_match() {
        let table = TruthTable::from_rows([("00", "10")]).unwrap();
        let pattern: OutputPattern = "1".parse().unwrap();
        assert!(matches!(
            table.filter(&pattern),
            Err(TableError::PatternWidthMismatch {
                pattern: 1,
                outputs: 2
            })
        ));
    }

    #[test]
    fn test_filter_keeps_labels() {
        let table = TruthTable::from_rows([("0", "1"), ("1", "0")])
            .unwrap()
            .with_labels(InputLabels::from_labels(["a"]), OutputLabels::from_labels(["f"]));
        let filtered = table.filter(&"1".parse().unwrap()).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.input_labels().name(0), "a");
        assert_eq!(filtered.output_labels().name(0), "f");
    }

    #[test]
    fn test_dont_care_table() {
        let table = TruthTable::from_rows([("00", "1"), ("01", "1"), ("10", "0"), ("11", "0")])
            .unwrap();
        let outcome =
            minimize_output(&table, 0, &MergeConfig::default(), &Budget::unlimited()).unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.len(), 1);
        let term = &outcome.terms()[0];
        assert_eq!(term.fixed().collect::<Vec<_>>(), vec![Literal::new(0, false)]);
        assert_eq!(term.literal(1), None);
    }

    #[test]
    fn test_minimize_table_per_output() {
        let table = TruthTable::from_rows([
            ("00", "10"),
            ("01", "11"),
            ("10", "01"),
            ("11", "00"),
        ])
        .unwrap();
        let outcomes =
            minimize_table(&table, &MergeConfig::default(), &Budget::unlimited()).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].terms()[0].to_string(), "(~x0)");
        assert_eq!(outcomes[1].terms()[0].to_string(), "(x0 ^ x1)");
        for (key, value) in table.iter() {
            for (bit, outcome) in outcomes.iter().enumerate() {
                let expected = value.as_bytes()[bit] == b'1';
                assert_eq!(outcome.covers(key).unwrap(), expected, "{} bit {}", key, bit);
            }
        }
    }

    #[test]
    fn test_minimize_output_out_of_range() {
        let table = TruthTable::from_rows([("0", "1")]).unwrap();
        assert!(matches!(
            minimize_output(&table, 1, &MergeConfig::default(), &Budget::unlimited()),
            Err(TableError::OutputOutOfRange { requested: 1, outputs: 1 })
        ));
    }
}
