//! Bit string to term encoding

use super::{Term, TermError};
use std::collections::BTreeMap;

/// Turns fixed-width `0`/`1` strings into fully specified terms
///
/// Position `i` of the string becomes variable `i`, with polarity equal to
/// the bit. Every term compared within one session must come from encoders of
/// the same width so that variable indices line up.
///
/// # Examples
///
/// ```
/// use cube_merge::{TermEncoder, TermError};
///
/// let encoder = TermEncoder::new(4);
/// let term = encoder.encode("0110").unwrap();
/// assert_eq!(term.fixed_len(), 4);
///
/// assert!(matches!(
///     encoder.encode("01x0"),
///     Err(TermError::InvalidEncoding { character: 'x', position: 2 })
/// ));
/// assert!(matches!(
///     encoder.encode("011"),
///     Err(TermError::WidthMismatch { left: 4, right: 3 })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermEncoder {
    width: usize,
}

impl TermEncoder {
    /// Create an encoder for rows of `width` bits
    pub fn new(width: usize) -> Self {
        TermEncoder { width }
    }

    /// Row width this encoder accepts
    pub fn width(&self) -> usize {
        self.width
    }

    /// Encode a single row
    pub fn encode(&self, bits: &str) -> Result<Term, TermError> {
        let mut fixed = BTreeMap::new();
        let mut len = 0;
        for (position, character) in bits.chars().enumerate() {
            let bit = match character {
                '0' => false,
                '1' => true,
                _ => {
                    return Err(TermError::InvalidEncoding {
                        character,
                        position,
                    })
                }
            };
            fixed.insert(position, bit);
            len += 1;
        }
        if len != self.width {
            return Err(TermError::WidthMismatch {
                left: self.width,
                right: len,
            });
        }
        Ok(Term::from_parts(self.width, fixed, BTreeMap::new()))
    }

    /// Encode every row, stopping at the first invalid one
    pub fn encode_all<'a, I>(&self, rows: I) -> Result<Vec<Term>, TermError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        rows.into_iter().map(|row| self.encode(row)).collect()
    }
}

impl Term {
    /// Encode a row using its own length as the width
    ///
    /// Shorthand for `TermEncoder::new(bits.len()).encode(bits)`.
    pub fn from_bits(bits: &str) -> Result<Term, TermError> {
        TermEncoder::new(bits.chars().count()).encode(bits)
    }
}
