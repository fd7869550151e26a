//! Delete command.

use std::io::Write;

use anyhow::Result;
use cf_db::Database;

/// Deletes an activity by ID.
pub fn run<W: Write>(writer: &mut W, db: &mut Database, id: i64) -> Result<()> {
    if db.delete_activity(id)? {
        tracing::info!(id, "deleted activity");
        writeln!(writer, "Deleted activity {id}.")?;
    } else {
        writeln!(writer, "No activity with ID {id}.")?;
    }
    Ok(())
}
