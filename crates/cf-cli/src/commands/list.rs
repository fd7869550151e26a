//! List command for printing recorded activities.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use cf_core::Activity;
use cf_db::Database;

/// Formats activities as an aligned table.
pub fn format_activities(activities: &[Activity]) -> String {
    let mut output = String::new();

    if activities.is_empty() {
        writeln!(output, "No activities recorded.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:>4}  {:<10}  {:<10}  {:<16}  {:>10}  {:<7}  {:>9}",
        "ID", "DATE", "CATEGORY", "TYPE", "QUANTITY", "UNIT", "KG CO2E"
    )
    .unwrap();
    for a in activities {
        writeln!(
            output,
            "{:>4}  {}  {:<10}  {:<16}  {:>10.2}  {:<7}  {:>9.2}",
            a.id, a.date, a.category, a.kind, a.quantity, a.unit, a.emission_kg
        )
        .unwrap();
    }

    let total: f64 = activities.iter().map(|a| a.emission_kg).sum();
    writeln!(output).unwrap();
    writeln!(
        output,
        "{} activities, {:.2} kg CO2e",
        activities.len(),
        cf_core::round2(total)
    )
    .unwrap();

    output
}

/// Runs the list command.
pub fn run<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let activities = db.list_activities()?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&activities)?)?;
    } else {
        write!(writer, "{}", format_activities(&activities))?;
    }
    Ok(())
}
