//! PLA reading and writing for truth tables

use cube_merge::pla::{PLAError, PLAReadError};
use cube_merge::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_write_fr_header_and_rows() {
    let table = TruthTable::from_rows([("000", "10"), ("011", "01"), ("101", "00")]).unwrap();
    let pla = table.to_pla_string(PLAType::FR).unwrap();
    let lines: Vec<&str> = pla.lines().collect();
    assert_eq!(
        lines,
        vec![".type fr", ".i 3", ".o 2", ".p 3", "000 10", "011 01", "101 00", ".e"]
    );
}

#[test]
fn test_string_round_trip_with_labels() {
    let table = TruthTable::from_rows([("01", "1"), ("10", "0"), ("11", "1")])
        .unwrap()
        .with_labels(
            InputLabels::from_labels(["a", "b"]),
            OutputLabels::from_labels(["out"]),
        );
    let pla = table.to_pla_string(PLAType::FR).unwrap();
    let reread = TruthTable::from_pla_string(&pla).unwrap();
    assert_eq!(reread, table);
    assert_eq!(reread.input_labels().find_position("b"), Some(1));
}

#[test]
fn test_f_type_drops_off_set() {
    let table = TruthTable::from_rows([("01", "1"), ("10", "0")]).unwrap();
    let pla = table.to_pla_string(PLAType::F).unwrap();
    assert!(!pla.contains(".type"));
    let reread = TruthTable::from_pla_string(&pla).unwrap();
    assert_eq!(reread.len(), 1);
    assert_eq!(reread.get("10"), None);
}

#[test]
fn test_read_file_and_minimize() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# two-input OR").unwrap();
    writeln!(file, ".i 2").unwrap();
    writeln!(file, ".o 1").unwrap();
    writeln!(file, ".ilb p q").unwrap();
    writeln!(file, ".ob f").unwrap();
    writeln!(file, ".p 4").unwrap();
    writeln!(file, ".type fr").unwrap();
    writeln!(file, "00 0").unwrap();
    writeln!(file, "01 1").unwrap();
    writeln!(file, "10 1").unwrap();
    writeln!(file, "11 1").unwrap();
    writeln!(file, ".e").unwrap();
    file.flush().unwrap();

    let table = TruthTable::from_pla_file(file.path()).unwrap();
    assert_eq!(table.len(), 4);
    let outcome =
        minimize_output(&table, 0, &MergeConfig::default(), &Budget::unlimited()).unwrap();
    assert!(outcome.is_complete());
    assert!(!outcome.covers("00").unwrap());
    for row in ["01", "10", "11"] {
        assert!(outcome.covers(row).unwrap());
    }
}

#[test]
fn test_read_errors() {
    let cases = [
        (".i two\n", "invalid .i"),
        (".i 2\n.o 1\n010 1\n", "dimension"),
        (".i 2\n.o 1\n01 2\n", "output character"),
        (".i 2\n.o 1\n.ilb a\n01 1\n", "label count"),
        (".i 2\n.o 1\n01\n", "malformed"),
    ];
    for (text, what) in cases {
        let err = TruthTable::from_pla_string(text).unwrap_err();
        assert!(matches!(err, PLAReadError::PLA(_)), "{}: {:?}", what, err);
    }

    let err = TruthTable::from_pla_string(".i 2\n.o 1\n01 2\n").unwrap_err();
    assert!(matches!(
        err,
        PLAReadError::PLA(PLAError::InvalidOutputCharacter {
            character: '2',
            line: 3,
            position: 0
        })
    ));
}

#[test]
fn test_missing_file() {
    let err = TruthTable::from_pla_file("/nonexistent/input.pla").unwrap_err();
    assert!(matches!(err, PLAReadError::Io(_)));
}
