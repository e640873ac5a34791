//! King-and-rook endgame tables
//!
//! The table generator writes one game state per line after a one-line
//! header. Lines come in pairs: a state where it is white's turn, followed by
//! the state after white's optimal reply. [`read_state_pairs`] parses that
//! text and [`MoveEncoder`] turns each pair into a truth-table row:
//!
//! - key: black king, white king and white rook positions, `x` then `y`,
//!   each coordinate written MSB-first in [`BoardConfig::position_bits`] bits;
//! - value: white king direction bits (`up down left right`), rook direction
//!   bits, then two distance fields for the rook.

use super::{TableError, TruthTable};
use crate::term::{InputLabels, OutputLabels};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const DIRECTION_BITS: usize = 4;
const DISTANCE_FIELDS: usize = 2;
const MAX_BOARD_SIZE: usize = 8;

/// Bit layout derived from the board size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    size: usize,
    position_bits: usize,
}

impl BoardConfig {
    /// Layout for an `n x n` board
    ///
    /// Boards up to 4x4 use 2 bits per coordinate, up to 8x8 use 3.
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::BoardConfig;
    ///
    /// let board = BoardConfig::for_board(8).unwrap();
    /// assert_eq!(board.position_bits(), 3);
    /// assert_eq!(board.key_width(), 18);
    /// assert_eq!(board.value_width(), 14);
    ///
    /// assert!(BoardConfig::for_board(9).is_err());
    /// ```
    pub fn for_board(size: usize) -> Result<Self, TableError> {
        let position_bits = match size {
            1..=4 => 2,
            5..=MAX_BOARD_SIZE => 3,
            _ => return Err(TableError::UnsupportedBoardSize { size }),
        };
        Ok(BoardConfig {
            size,
            position_bits,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Bits per coordinate
    pub fn position_bits(&self) -> usize {
        self.position_bits
    }

    /// Bits per direction block (`up down left right`)
    pub fn direction_bits(&self) -> usize {
        DIRECTION_BITS
    }

    /// Number of rook distance fields
    pub fn distance_fields(&self) -> usize {
        DISTANCE_FIELDS
    }

    /// Key width: three pieces, two coordinates each
    pub fn key_width(&self) -> usize {
        6 * self.position_bits
    }

    /// Value width: king and rook directions plus the distance fields
    pub fn value_width(&self) -> usize {
        2 * DIRECTION_BITS + DISTANCE_FIELDS * self.position_bits
    }

    /// Key bit names, e.g. `bkx2 bkx1 bkx0 bky2 ... wry0`
    pub fn input_labels(&self) -> InputLabels {
        let names = ["bkx", "bky", "wkx", "wky", "wrx", "wry"]
            .iter()
            .flat_map(|piece| self.bit_names(piece))
            .collect::<Vec<_>>();
        InputLabels::from_labels(names)
    }

    /// Value bit names: `ku kd kl kr ru rd rl rr rx2 .. ry0`
    pub fn output_labels(&self) -> OutputLabels {
        let mut names: Vec<String> = ["ku", "kd", "kl", "kr", "ru", "rd", "rl", "rr"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        names.extend(self.bit_names("rx"));
        names.extend(self.bit_names("ry"));
        OutputLabels::from_labels(names)
    }

    fn bit_names<'a>(&self, prefix: &'a str) -> impl Iterator<Item = String> + 'a {
        (0..self.position_bits)
            .rev()
            .map(move |bit| format!("{}{}", prefix, bit))
    }
}

/// A board square, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    pub fn new(x: u8, y: u8) -> Self {
        Square { x, y }
    }
}

/// One line of the endgame table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessState {
    pub white_to_move: bool,
    pub rook_captured: bool,
    pub black_king: Square,
    pub white_king: Square,
    pub white_rook: Square,
}

impl ChessState {
    /// Parse `turn captured bkx bky wkx wky wrx wry`
    ///
    /// `line` is the 1-based line number reported on failure.
    pub fn parse(content: &str, line: usize) -> Result<Self, TableError> {
        let malformed = |reason: String| TableError::MalformedInputRow {
            line,
            content: content.to_string(),
            reason,
        };

        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() != 8 {
            return Err(malformed(format!(
                "expected 8 integers, found {}",
                fields.len()
            )));
        }

        let flag = |field: &str| match field {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(malformed(format!("flag '{}' is not 0 or 1", field))),
        };
        let coord = |field: &str| {
            field
                .parse::<u8>()
                .map_err(|_| malformed(format!("coordinate '{}' is not a board index", field)))
        };

        Ok(ChessState {
            white_to_move: flag(fields[0])?,
            rook_captured: flag(fields[1])?,
            black_king: Square::new(coord(fields[2])?, coord(fields[3])?),
            white_king: Square::new(coord(fields[4])?, coord(fields[5])?),
            white_rook: Square::new(coord(fields[6])?, coord(fields[7])?),
        })
    }
}

/// A state and the state after white's reply
pub type StatePair = (ChessState, ChessState);

/// Read `(before, after)` state pairs from table text
///
/// The first line is a header and is skipped, as are blank lines. A final
/// state without a following line fails with [`TableError::UnpairedState`].
pub fn read_state_pairs<R: BufRead>(reader: R) -> Result<Vec<StatePair>, TableError> {
    let mut pairs = Vec::new();
    let mut pending: Option<(usize, ChessState)> = None;

    for (index, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let state = ChessState::parse(&line, index + 1)?;
        match pending.take() {
            None => pending = Some((index + 1, state)),
            Some((_, before)) => pairs.push((before, state)),
        }
    }

    if let Some((line, _)) = pending {
        return Err(TableError::UnpairedState { line });
    }
    Ok(pairs)
}

/// Read state pairs from a table file
pub fn read_state_file<P: AsRef<Path>>(path: P) -> Result<Vec<StatePair>, TableError> {
    let file = File::open(path)?;
    read_state_pairs(BufReader::new(file))
}

/// Encodes state pairs as truth-table rows for one board layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEncoder {
    board: BoardConfig,
}

impl MoveEncoder {
    pub fn new(board: BoardConfig) -> Self {
        MoveEncoder { board }
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    /// Key bits for a state: BK, WK, WR positions, `x` then `y`
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_merge::{BoardConfig, ChessState, MoveEncoder};
    ///
    /// # fn main() -> Result<(), cube_merge::TableError> {
    /// let encoder = MoveEncoder::new(BoardConfig::for_board(8)?);
    /// let state = ChessState::parse("1 0 4 7 4 5 0 0", 1)?;
    /// assert_eq!(encoder.encode_state(&state)?, "100111100101000000");
    /// # Ok(())
    /// # }
    /// ```
    pub fn encode_state(&self, state: &ChessState) -> Result<String, TableError> {
        let mut key = String::with_capacity(self.board.key_width());
        for square in [state.black_king, state.white_king, state.white_rook] {
            for value in [square.x, square.y] {
                let bits = self.board.position_bits;
                let field = to_bits(u32::from(value), bits)
                    .ok_or(TableError::CoordinateOutOfRange { value, bits })?;
                key.push_str(&field);
            }
        }
        Ok(key)
    }

    /// Value bits describing the move from `before` to `after`
    ///
    /// If the white king moved, its direction bits come first and the rest is
    /// zero. Otherwise the rook moved: the king bits are zero, then the rook
    /// direction and distance. A vertical rook move writes the distance into
    /// the first field, a horizontal one into the last.
    pub fn encode_move(
        &self,
        before: &ChessState,
        after: &ChessState,
    ) -> Result<String, TableError> {
        let width = self.board.value_width();
        let mut value = String::with_capacity(width);

        if before.white_king != after.white_king {
            push_directions(&mut value, before.white_king, after.white_king);
            pad_to(&mut value, width);
            return Ok(value);
        }

        pad_to(&mut value, DIRECTION_BITS);
        let (from, to) = (before.white_rook, after.white_rook);
        push_directions(&mut value, from, to);

        let distance = (i32::from(from.x) - i32::from(to.x) + i32::from(from.y) - i32::from(to.y))
            .unsigned_abs();
        let bits = self.board.position_bits;
        let field =
            to_bits(distance, bits).ok_or(TableError::DistanceOutOfRange { distance, bits })?;

        let vertical = from.y != to.y;
        if vertical {
            value.push_str(&field);
            pad_to(&mut value, width);
        } else {
            pad_to(&mut value, width - bits);
            value.push_str(&field);
        }
        debug_assert_eq!(value.len(), width);
        Ok(value)
    }

    /// Build a labelled truth table from state pairs
    ///
    /// A before-state seen more than once keeps its last move.
    pub fn build_table<I>(&self, pairs: I) -> Result<TruthTable, TableError>
    where
        I: IntoIterator<Item = StatePair>,
    {
        let mut table = TruthTable::new(self.board.key_width(), self.board.value_width())
            .with_labels(self.board.input_labels(), self.board.output_labels());
        let mut read = 0;
        for (before, after) in pairs {
            let key = self.encode_state(&before)?;
            let value = self.encode_move(&before, &after)?;
            table.insert(&key, &value)?;
            read += 1;
        }
        debug!(
            "encoded {} state pairs into {} rows for a {}x{} board",
            read,
            table.len(),
            self.board.size,
            self.board.size
        );
        Ok(table)
    }
}

/// `value` MSB-first in exactly `bits` bits, or `None` if it does not fit
fn to_bits(value: u32, bits: usize) -> Option<String> {
    if bits < u32::BITS as usize && value >> bits != 0 {
        return None;
    }
    Some(
        (0..bits)
            .rev()
            .map(|bit| if (value >> bit) & 1 == 1 { '1' } else { '0' })
            .collect(),
    )
}

fn push_directions(out: &mut String, from: Square, to: Square) {
    let up = to.y > from.y;
    let down = from.y > to.y;
    let left = from.x > to.x;
    let right = to.x > from.x;
    for set in [up, down, left, right] {
        out.push(if set { '1' } else { '0' });
    }
}

fn pad_to(out: &mut String, width: usize) {
    while out.len() < width {
        out.push('0');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn state(line: &str) -> ChessState {
        ChessState::parse(line, 1).unwrap()
    }

    fn encoder(size: usize) -> MoveEncoder {
        MoveEncoder::new(BoardConfig::for_board(size).unwrap())
    }

    #[test]
    fn test_board_config_sizes() {
        assert_eq!(BoardConfig::for_board(3).unwrap().position_bits(), 2);
        assert_eq!(BoardConfig::for_board(4).unwrap().position_bits(), 2);
        assert_eq!(BoardConfig::for_board(5).unwrap().position_bits(), 3);

        let board = BoardConfig::for_board(4).unwrap();
        assert_eq!(board.key_width(), 12);
        assert_eq!(board.value_width(), 12);

        assert!(matches!(
            BoardConfig::for_board(0),
            Err(TableError::UnsupportedBoardSize { size: 0 })
        ));
        assert!(matches!(
            BoardConfig::for_board(9),
            Err(TableError::UnsupportedBoardSize { size: 9 })
        ));
    }

    #[test]
    fn test_board_labels() {
        let board = BoardConfig::for_board(8).unwrap();
        let inputs = board.input_labels();
        assert_eq!(inputs.len(), 18);
        assert_eq!(inputs.name(0), "bkx2");
        assert_eq!(inputs.name(3), "bky2");
        assert_eq!(inputs.name(17), "wry0");

        let outputs = board.output_labels();
        assert_eq!(outputs.len(), 14);
        assert_eq!(outputs.name(0), "ku");
        assert_eq!(outputs.name(7), "rr");
        assert_eq!(outputs.name(8), "rx2");
        assert_eq!(outputs.name(13), "ry0");
    }

    #[test]
    fn test_parse_state() {
        let s = state("1 0 4 7 4 5 0 0");
        assert!(s.white_to_move);
        assert!(!s.rook_captured);
        assert_eq!(s.black_king, Square::new(4, 7));
        assert_eq!(s.white_king, Square::new(4, 5));
        assert_eq!(s.white_rook, Square::new(0, 0));
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        let lines = [
            "1 0 4 7 4 5 0",
            "1 0 4 7 4 5 0 0 0",
            "2 0 4 7 4 5 0 0",
            "1 0 4 -7 4 5 0 0",
            "1 0 a 7 4 5 0 0",
        ];
        for bad in lines {
            let err = ChessState::parse(bad, 12).unwrap_err();
            assert!(
                matches!(err, TableError::MalformedInputRow { line: 12, .. }),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_read_state_pairs() {
        let text = "# kings and rook 8x8\n\
                    1 0 4 7 4 5 0 0\n0 0 4 7 4 5 0 7\n\n\
                    1 0 0 0 2 2 7 7\n0 0 0 0 1 1 7 7\n";
        let pairs = read_state_pairs(Cursor::new(text)).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].1.white_rook, Square::new(0, 7));
        assert_eq!(pairs[1].1.white_king, Square::new(1, 1));
    }

    #[test]
    fn test_read_state_pairs_errors() {
        let text = "header\n1 0 4 7 4 5 0 0\n0 0 4 7 4 5 0 7\n1 0 0 0 2 2 7 7\n";
        assert!(matches!(
            read_state_pairs(Cursor::new(text)),
            Err(TableError::UnpairedState { line: 4 })
        ));

        let text = "header\n1 0 4 7 4 5 0 0\n0 0 4 7\n";
        assert!(matches!(
            read_state_pairs(Cursor::new(text)),
            Err(TableError::MalformedInputRow { line: 3, .. })
        ));
    }

    #[test]
    fn test_read_state_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "header").unwrap();
        writeln!(file, "1 0 4 7 4 5 0 0").unwrap();
        writeln!(file, "0 0 4 7 4 5 3 0").unwrap();
        let pairs = read_state_file(file.path()).unwrap();
        assert_eq!(pairs.len(), 1);

        assert!(matches!(
            read_state_file("/nonexistent/table.txt"),
            Err(TableError::Io(_))
        ));
    }

    #[test]
    fn test_encode_state() {
        let enc = encoder(8);
        assert_eq!(
            enc.encode_state(&state("1 0 4 7 4 5 0 0")).unwrap(),
            "100111100101000000"
        );

        let enc = encoder(4);
        assert_eq!(enc.encode_state(&state("1 0 3 2 1 0 0 3")).unwrap(), "111001000011");
        assert!(matches!(
            enc.encode_state(&state("1 0 4 0 1 0 0 3")),
            Err(TableError::CoordinateOutOfRange { value: 4, bits: 2 })
        ));
    }

    #[test]
    fn test_encode_king_move() {
        let enc = encoder(8);
        let before = state("1 0 4 7 4 5 0 0");
        let after = state("0 0 4 7 3 6 0 0");
        assert_eq!(enc.encode_move(&before, &after).unwrap(), "10100000000000");

        let after = state("0 0 4 7 5 4 0 0");
        assert_eq!(enc.encode_move(&before, &after).unwrap(), "01010000000000");
    }

    #[test]
    fn test_encode_vertical_rook_move() {
        let enc = encoder(8);
        let before = state("1 0 4 7 4 5 0 0");
        let after = state("0 0 4 7 4 5 0 7");
        assert_eq!(enc.encode_move(&before, &after).unwrap(), "00001000111000");

        let before = state("1 0 4 7 4 5 2 6");
        let after = state("0 0 4 7 4 5 2 1");
        assert_eq!(enc.encode_move(&before, &after).unwrap(), "00000100101000");
    }

    #[test]
    fn test_encode_horizontal_rook_move() {
        let enc = encoder(8);
        let before = state("1 0 4 7 4 5 0 0");
        let after = state("0 0 4 7 4 5 3 0");
        assert_eq!(enc.encode_move(&before, &after).unwrap(), "00000001000011");

        let before = state("1 0 4 7 4 5 6 0");
        let after = state("0 0 4 7 4 5 1 0");
        assert_eq!(enc.encode_move(&before, &after).unwrap(), "00000010000101");
    }

    #[test]
    fn test_encode_distance_out_of_range() {
        let enc = encoder(4);
        let before = state("1 0 3 3 2 2 0 0");
        let after = state("0 0 3 3 2 2 0 5");
        assert!(matches!(
            enc.encode_move(&before, &after),
            Err(TableError::DistanceOutOfRange {
                distance: 5,
                bits: 2
            })
        ));
    }

    #[test]
    fn test_build_table_overwrites_duplicates() {
        let enc = encoder(8);
        let before = state("1 0 4 7 4 5 0 0");
        let pairs = vec![
            (before, state("0 0 4 7 4 5 0 7")),
            (before, state("0 0 4 7 4 5 3 0")),
        ];
        let table = enc.build_table(pairs).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("100111100101000000"), Some("00000001000011"));
        assert_eq!(table.input_labels().name(0), "bkx2");
        assert_eq!(table.output_labels().name(0), "ku");
    }
}
