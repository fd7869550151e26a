//! Add command for recording an activity from the command line.

use std::io::Write;

use anyhow::{Context, Result};
use cf_core::{EmissionCalculator, NewActivity, parse_date};
use cf_db::Database;
use chrono::NaiveDate;

/// Records `input`, printing the stored activity as JSON.
///
/// `date` follows the API rules: blank or absent means `today`.
pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    calculator: &EmissionCalculator,
    mut input: NewActivity,
    date: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    input.date = parse_date(date.unwrap_or_default()).context("invalid --date")?;

    let activity = crate::tracker::record_activity(db, calculator, input, today)
        .context("failed to record activity")?;

    writeln!(writer, "{}", serde_json::to_string_pretty(&activity)?)?;
    Ok(())
}
