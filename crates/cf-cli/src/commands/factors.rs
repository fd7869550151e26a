//! Factors command for printing the emission factor table.

use std::io::Write;

use anyhow::Result;
use cf_core::EmissionCalculator;

/// Prints the factors new activities are priced with.
pub fn run<W: Write>(writer: &mut W, calculator: &EmissionCalculator, json: bool) -> Result<()> {
    let rows = calculator.factor_table();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    writeln!(writer, "{:<10}  {:<16}  {:>7}  BASIS", "CATEGORY", "TYPE", "KG CO2E")?;
    for row in rows {
        writeln!(
            writer,
            "{:<10}  {:<16}  {:>7.3}  {}",
            row.category.as_str(),
            row.kind,
            row.factor,
            row.basis
        )?;
    }
    Ok(())
}
