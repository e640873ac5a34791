//! PLA (Programmable Logic Array) format support
//!
//! Truth tables can be written as PLA for an external exact minimizer and
//! read back from `.type f` / `.type fr` PLA files. Only fully specified rows
//! are accepted on input, since every row must encode to a single term.

mod error;

pub use error::{PLAError, PLAReadError, PLAWriteError};

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use crate::table::{TableError, TruthTable};
use crate::term::{InputLabels, OutputLabels};

/// Which rows a PLA file lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PLAType {
    /// ON-set only: rows with at least one output bit set
    F,
    /// ON-set and OFF-set: every row, `0` outputs meaning OFF
    #[default]
    FR,
}

/// Internal trait for types that can be serialized to and deserialized from PLA format
pub(crate) trait PLASerialisable: Sized {
    fn num_inputs(&self) -> usize;

    fn num_outputs(&self) -> usize;

    /// Iterate over `(inputs, outputs)` rows
    fn pla_rows(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_>;

    /// Input labels, if any were set
    fn get_input_labels(&self) -> Option<&[Arc<str>]>;

    /// Output labels, if any were set
    fn get_output_labels(&self) -> Option<&[Arc<str>]>;

    /// Create an instance from parsed PLA components
    fn create_from_pla_parts(
        num_inputs: usize,
        num_outputs: usize,
        input_labels: Vec<Arc<str>>,
        output_labels: Vec<Arc<str>>,
        rows: Vec<(String, String)>,
    ) -> Result<Self, TableError>;
}

/// Trait for types that support PLA serialization (writing)
pub trait PLAWriter {
    /// Write PLA text to any `Write` implementation
    fn write_pla<W: Write>(&self, writer: &mut W, pla_type: PLAType) -> Result<(), PLAWriteError>;

    /// Convert to a PLA format string
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::pla::PLAType;
    /// use cube_merge::{PLAWriter, TruthTable};
    ///
    /// let table = TruthTable::from_rows([("01", "1"), ("10", "0")]).unwrap();
    /// let pla = table.to_pla_string(PLAType::FR).unwrap();
    /// assert_eq!(pla, ".type fr\n.i 2\n.o 1\n.p 2\n01 1\n10 0\n.e\n");
    /// ```
    fn to_pla_string(&self, pla_type: PLAType) -> Result<String, PLAWriteError> {
        let mut buffer = Vec::new();
        self.write_pla(&mut buffer, pla_type)?;
        String::from_utf8(buffer)
            .map_err(|e| PLAWriteError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Write to a PLA file
    fn to_pla_file<P: AsRef<Path>>(&self, path: P, pla_type: PLAType) -> Result<(), PLAWriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pla(&mut writer, pla_type)?;
        writer.flush()?;
        Ok(())
    }
}

impl<T: PLASerialisable> PLAWriter for T {
    fn write_pla<W: Write>(&self, writer: &mut W, pla_type: PLAType) -> Result<(), PLAWriteError> {
        match pla_type {
            PLAType::FR => writeln!(writer, ".type fr")?,
            PLAType::F => {}
        }

        writeln!(writer, ".i {}", self.num_inputs())?;
        if let Some(labels) = self.get_input_labels() {
            write!(writer, ".ilb")?;
            for label in labels {
                write!(writer, " {}", label)?;
            }
            writeln!(writer)?;
        }

        writeln!(writer, ".o {}", self.num_outputs())?;
        if let Some(labels) = self.get_output_labels() {
            write!(writer, ".ob")?;
            for label in labels {
                write!(writer, " {}", label)?;
            }
            writeln!(writer)?;
        }

        let rows: Vec<_> = self
            .pla_rows()
            .filter(|(_, outputs)| match pla_type {
                PLAType::F => outputs.contains('1'),
                PLAType::FR => true,
            })
            .collect();
        writeln!(writer, ".p {}", rows.len())?;
        for (inputs, outputs) in rows {
            writeln!(writer, "{} {}", inputs, outputs)?;
        }

        writeln!(writer, ".e")?;
        Ok(())
    }
}

/// Trait for types that support PLA deserialization (reading/parsing)
pub trait PLAReader: Sized {
    /// Parse from any `BufRead` implementation
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PLAReadError>;

    /// Parse from a PLA format string
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::{PLAReader, TruthTable};
    ///
    /// let pla = ".i 2\n.o 1\n.p 1\n01 1\n.e\n";
    /// let table = TruthTable::from_pla_string(pla).unwrap();
    /// assert_eq!(table.input_width(), 2);
    /// assert_eq!(table.get("01"), Some("1"));
    /// ```
    fn from_pla_string(s: &str) -> Result<Self, PLAReadError> {
        Self::from_pla_reader(io::Cursor::new(s.as_bytes()))
    }

    /// Load from a PLA format file
    ///
    /// ```no_run
    /// use cube_merge::{PLAReader, TruthTable};
    ///
    /// let table = TruthTable::from_pla_file("input.pla").unwrap();
    /// println!("Loaded {} rows", table.len());
    /// ```
    fn from_pla_file<P: AsRef<Path>>(path: P) -> Result<Self, PLAReadError> {
        let file = File::open(path)?;
        Self::from_pla_reader(BufReader::new(file))
    }
}

impl<T: PLASerialisable> PLAReader for T {
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PLAReadError> {
        let mut num_inputs: Option<usize> = None;
        let mut num_outputs: Option<usize> = None;
        let mut input_labels: Option<Vec<Arc<str>>> = None;
        let mut output_labels: Option<Vec<Arc<str>>> = None;
        let mut rows = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if trimmed.starts_with('.') {
                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                let value = || parts.get(1).copied().unwrap_or("").to_string();
                match parts.first().copied() {
                    Some(".i") => {
                        let n = parts.get(1).and_then(|s| s.parse().ok());
                        num_inputs = Some(n.ok_or_else(|| PLAError::InvalidInputDirective {
                            value: value(),
                        })?);
                    }
                    Some(".o") => {
                        let n = parts.get(1).and_then(|s| s.parse().ok());
                        num_outputs = Some(n.ok_or_else(|| PLAError::InvalidOutputDirective {
                            value: value(),
                        })?);
                    }
                    Some(".type") => match parts.get(1).copied() {
                        Some("f") | Some("fr") => {}
                        _ => return Err(PLAError::UnsupportedType { value: value() }.into()),
                    },
                    Some(".ilb") => {
                        input_labels = Some(parts[1..].iter().map(|s| Arc::from(*s)).collect());
                    }
                    Some(".ob") => {
                        output_labels = Some(parts[1..].iter().map(|s| Arc::from(*s)).collect());
                    }
                    Some(".e") | Some(".end") => break,
                    _ => {}
                }
                continue;
            }

            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            let [inputs, outputs] = parts[..] else {
                return Err(PLAError::MalformedRow {
                    line: line_no,
                    content: trimmed.to_string(),
                }
                .into());
            };

            let ni = *num_inputs.get_or_insert(inputs.chars().count());
            let no = *num_outputs.get_or_insert(outputs.chars().count());
            let (actual_inputs, actual_outputs) = (inputs.chars().count(), outputs.chars().count());
            if actual_inputs != ni || actual_outputs != no {
                return Err(PLAError::RowDimensionMismatch {
                    line: line_no,
                    expected_inputs: ni,
                    actual_inputs,
                    expected_outputs: no,
                    actual_outputs,
                }
                .into());
            }

            rows.push((
                parse_inputs(inputs, line_no)?,
                parse_outputs(outputs, line_no)?,
            ));
        }

        let num_inputs = num_inputs.ok_or(PLAError::MissingInputDirective)?;
        let num_outputs = num_outputs.ok_or(PLAError::MissingOutputDirective)?;

        let input_labels = check_labels(input_labels, num_inputs, "input")?;
        let output_labels = check_labels(output_labels, num_outputs, "output")?;

        Ok(T::create_from_pla_parts(
            num_inputs,
            num_outputs,
            input_labels,
            output_labels,
            rows,
        )?)
    }
}

fn parse_inputs(inputs: &str, line: usize) -> Result<String, PLAError> {
    inputs
        .chars()
        .enumerate()
        .map(|(position, character)| match character {
            '0' | '1' => Ok(character),
            _ => Err(PLAError::InvalidInputCharacter {
                character,
                line,
                position,
            }),
        })
        .collect()
}

/// `1`/`4` are ON, `0`/`3`/`~` are OFF; output don't-cares are not supported
fn parse_outputs(outputs: &str, line: usize) -> Result<String, PLAError> {
    outputs
        .chars()
        .enumerate()
        .map(|(position, character)| match character {
            '1' | '4' => Ok('1'),
            '0' | '3' | '~' => Ok('0'),
            _ => Err(PLAError::InvalidOutputCharacter {
                character,
                line,
                position,
            }),
        })
        .collect()
}

fn check_labels(
    labels: Option<Vec<Arc<str>>>,
    expected: usize,
    label_type: &'static str,
) -> Result<Vec<Arc<str>>, PLAError> {
    match labels {
        Some(labels) if labels.len() != expected => Err(PLAError::LabelCountMismatch {
            label_type,
            expected,
            actual: labels.len(),
        }),
        Some(labels) => Ok(labels),
        None => Ok(Vec::new()),
    }
}

impl PLASerialisable for TruthTable {
    fn num_inputs(&self) -> usize {
        self.input_width()
    }

    fn num_outputs(&self) -> usize {
        self.output_width()
    }

    fn pla_rows(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        Box::new(self.iter())
    }

    fn get_input_labels(&self) -> Option<&[Arc<str>]> {
        Some(self.input_labels().as_slice()).filter(|l| !l.is_empty())
    }

    fn get_output_labels(&self) -> Option<&[Arc<str>]> {
        Some(self.output_labels().as_slice()).filter(|l| !l.is_empty())
    }

    /// Rows repeating an input OR their outputs together
    fn create_from_pla_parts(
        num_inputs: usize,
        num_outputs: usize,
        input_labels: Vec<Arc<str>>,
        output_labels: Vec<Arc<str>>,
        rows: Vec<(String, String)>,
    ) -> Result<Self, TableError> {
        let mut table = TruthTable::new(num_inputs, num_outputs).with_labels(
            InputLabels::from_labels(input_labels),
            OutputLabels::from_labels(output_labels),
        );
        for (inputs, outputs) in rows {
            let value = match table.get(&inputs) {
                Some(existing) => existing
                    .chars()
                    .zip(outputs.chars())
                    .map(|(a, b)| if a == '1' || b == '1' { '1' } else { '0' })
                    .collect(),
                None => outputs,
            };
            table.insert(&inputs, &value)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_f_type_skips_off_rows() {
        let table = TruthTable::from_rows([("00", "10"), ("01", "00"), ("11", "01")]).unwrap();
        let pla = table.to_pla_string(PLAType::F).unwrap();
        assert_eq!(pla, ".i 2\n.o 2\n.p 2\n00 10\n11 01\n.e\n");
    }

    #[test]
    fn test_write_labels() {
        let table = TruthTable::from_rows([("0", "1")])
            .unwrap()
            .with_labels(InputLabels::from_labels(["a"]), OutputLabels::from_labels(["f"]));
        let pla = table.to_pla_string(PLAType::FR).unwrap();
        assert!(pla.contains(".ilb a\n"));
        assert!(pla.contains(".ob f\n"));
    }

    #[test]
    fn test_read_ors_repeated_inputs() {
        let pla = ".i 2\n.o 2\n01 10\n01 01\n";
        let table = TruthTable::from_pla_string(pla).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("01"), Some("11"));
    }

    #[test]
    fn test_read_infers_dimensions() {
        let table = TruthTable::from_pla_string("# no header\n101 1\n011 0\n").unwrap();
        assert_eq!(table.input_width(), 3);
        assert_eq!(table.output_width(), 1);
        assert_eq!(table.on_set(0).collect::<Vec<_>>(), vec!["101"]);
    }

    #[test]
    fn test_read_rejects_dont_care_inputs() {
        let err = TruthTable::from_pla_string(".i 2\n.o 1\n.p 1\n0- 1\n.e\n").unwrap_err();
        assert!(matches!(
            err,
            PLAReadError::PLA(PLAError::InvalidInputCharacter {
                character: '-',
                line: 4,
                position: 1
            })
        ));
    }

    #[test]
    fn test_read_rejects_unsupported_type() {
        let err = TruthTable::from_pla_string(".type fd\n.i 1\n.o 1\n").unwrap_err();
        assert!(matches!(
            err,
            PLAReadError::PLA(PLAError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_read_missing_dimensions() {
        let err = TruthTable::from_pla_string(".p 0\n.e\n").unwrap_err();
        assert!(matches!(
            err,
            PLAReadError::PLA(PLAError::MissingInputDirective)
        ));
    }
}
