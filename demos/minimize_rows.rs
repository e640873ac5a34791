//! Minimize a small truth table and print the result per output bit
//!
//! Run with `cargo run --example minimize_rows`.

use cube_merge::{minimize_table, Budget, InputLabels, MergeConfig, OutputLabels, TruthTable};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Full adder: inputs a b cin, outputs sum cout
    let table = TruthTable::from_rows([
        ("000", "00"),
        ("001", "10"),
        ("010", "10"),
        ("011", "01"),
        ("100", "10"),
        ("101", "01"),
        ("110", "01"),
        ("111", "11"),
    ])?
    .with_labels(
        InputLabels::from_labels(["a", "b", "cin"]),
        OutputLabels::from_labels(["sum", "cout"]),
    );

    let outcomes = minimize_table(&table, &MergeConfig::default(), &Budget::unlimited())?;
    for (bit, outcome) in outcomes.iter().enumerate() {
        println!(
            "{} ({} terms, {} passes):",
            table.output_labels().name(bit),
            outcome.len(),
            outcome.passes()
        );
        for term in outcome.terms() {
            println!("  {}", term.display_with(table.input_labels()));
        }
    }
    Ok(())
}
