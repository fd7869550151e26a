//! Summary command for emissions over a date range.
//!
//! Uses the same defaults as the API: the trailing 30 days ending today.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use cf_core::{Summary, SummaryWindow, parse_date};
use cf_db::Database;
use chrono::NaiveDate;

/// Formats a summary for the terminal.
pub fn format_summary(summary: &Summary) -> String {
    let mut output = String::new();

    writeln!(output, "EMISSIONS: {} to {}", summary.from, summary.to).unwrap();
    writeln!(output, "Total: {:.2} kg CO2e", summary.total_kg).unwrap();

    if !summary.by_category.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "BY CATEGORY").unwrap();
        for (category, kg) in &summary.by_category {
            writeln!(output, "  {category:<12} {kg:>8.2} kg").unwrap();
        }
    }

    if !summary.by_day.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "BY DAY").unwrap();
        for point in &summary.by_day {
            writeln!(output, "  {}   {:>8.2} kg", point.date, point.kg).unwrap();
        }
    }

    output
}

/// Runs the summary command.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
    today: NaiveDate,
) -> Result<()> {
    let from = parse_date(from.unwrap_or_default()).context("invalid --from")?;
    let to = parse_date(to.unwrap_or_default()).context("invalid --to")?;
    let window = SummaryWindow::resolve(from, to, today);

    let summary = crate::tracker::summarize_window(db, window)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(writer, "{}", format_summary(&summary))?;
    }
    Ok(())
}
