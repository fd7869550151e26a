//! Storage layer for the carbon footprint tracker.
//!
//! Provides persistence for activity records using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! The HTTP server shares one instance behind a mutex, which also serializes
//! concurrent writes.
//!
//! # Schema
//!
//! A single `activities` table. Records are inserted and deleted, never updated:
//! `emission_kg` is computed once before insertion and kept as written.
//!
//! ## Date Format
//!
//! `date` is stored as TEXT in `YYYY-MM-DD` form with no time of day, so
//! lexicographic ordering matches chronological ordering and an inclusive
//! `BETWEEN` never drops a boundary day. `created_at` is an RFC 3339 UTC timestamp.
//!
//! ## Metadata
//!
//! `meta` holds the client's free-form JSON object as text (`{}` when absent).

use std::path::Path;

use cf_core::{Activity, DATE_FORMAT, NewActivity};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{Connection, Row, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse a stored activity date.
    #[error("invalid date for activity {activity_id}: {date}")]
    DateParse {
        activity_id: i64,
        date: String,
        #[source]
        source: chrono::ParseError,
    },
    /// Failed to parse a stored creation timestamp.
    #[error("invalid timestamp for activity {activity_id}: {timestamp}")]
    TimestampParse {
        activity_id: i64,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// Stored metadata is not valid JSON.
    #[error("invalid metadata for activity {activity_id}: {message}")]
    InvalidMeta { activity_id: i64, message: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Raw column values as read from the `activities` table.
struct ActivityRow {
    id: i64,
    category: String,
    kind: String,
    quantity: f64,
    unit: String,
    meta: String,
    emission_kg: f64,
    date: String,
    created_at: String,
}

const SELECT_COLUMNS: &str =
    "SELECT id, category, type, quantity, unit, meta, emission_kg, date, created_at FROM activities";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- Activities table: one row per logged activity
            -- date: calendar day, 'YYYY-MM-DD'
            -- created_at: RFC 3339 UTC (e.g., '2025-01-15T10:30:00Z')
            -- meta: JSON object with client-supplied extras
            CREATE TABLE IF NOT EXISTS activities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                type TEXT NOT NULL,
                quantity REAL NOT NULL DEFAULT 0,
                unit TEXT NOT NULL DEFAULT '',
                meta TEXT NOT NULL DEFAULT '{}',
                emission_kg REAL NOT NULL DEFAULT 0,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date);
            ",
        )?;
        Ok(())
    }

    /// Inserts an activity with its precomputed emissions and returns the stored record.
    ///
    /// `date` is the resolved calendar day; `activity.date` is ignored so the
    /// caller decides what "today" means.
    pub fn insert_activity(
        &mut self,
        activity: &NewActivity,
        emission_kg: f64,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Activity, DbError> {
        let meta = activity.meta.to_string();
        self.conn.execute(
            "
            INSERT INTO activities
            (category, type, quantity, unit, meta, emission_kg, date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                activity.category,
                activity.kind,
                activity.quantity,
                activity.unit,
                meta,
                emission_kg,
                format_date(date),
                format_timestamp(created_at),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, category = %activity.category, emission_kg, "inserted activity");

        Ok(Activity {
            id,
            category: activity.category.clone(),
            kind: activity.kind.clone(),
            quantity: activity.quantity,
            unit: activity.unit.clone(),
            meta: activity.meta.clone(),
            emission_kg,
            date,
            // Match the stored precision so a re-read compares equal.
            created_at: truncate_to_seconds(created_at),
        })
    }

    /// Lists all activities ordered by date then ID.
    pub fn list_activities(&self) -> Result<Vec<Activity>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY date ASC, id ASC"))?;
        let rows = stmt.query_map([], activity_row)?;
        let mut activities = Vec::new();
        for row in rows {
            activities.push(row?.into_activity()?);
        }
        Ok(activities)
    }

    /// Lists activities whose date lies within `[from, to]`, ordered by date then ID.
    ///
    /// Both bounds are inclusive. Returns nothing when `from > to`.
    pub fn list_activities_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Activity>, DbError> {
        if from > to {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE date BETWEEN ? AND ? ORDER BY date ASC, id ASC"
        ))?;
        let rows = stmt.query_map([format_date(from), format_date(to)], activity_row)?;
        let mut activities = Vec::new();
        for row in rows {
            activities.push(row?.into_activity()?);
        }
        Ok(activities)
    }

    /// Deletes an activity by ID.
    ///
    /// Returns whether a row was removed.
    pub fn delete_activity(&mut self, id: i64) -> Result<bool, DbError> {
        let removed = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?", [id])?;
        Ok(removed > 0)
    }

    /// Counts stored activities.
    pub fn count_activities(&self) -> Result<i64, DbError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn activity_row(row: &Row<'_>) -> rusqlite::Result<ActivityRow> {
    Ok(ActivityRow {
        id: row.get(0)?,
        category: row.get(1)?,
        kind: row.get(2)?,
        quantity: row.get(3)?,
        unit: row.get(4)?,
        meta: row.get(5)?,
        emission_kg: row.get(6)?,
        date: row.get(7)?,
        created_at: row.get(8)?,
    })
}

impl ActivityRow {
    fn into_activity(self) -> Result<Activity, DbError> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|source| {
            DbError::DateParse {
                activity_id: self.id,
                date: self.date.clone(),
                source,
            }
        })?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|source| DbError::TimestampParse {
                activity_id: self.id,
                timestamp: self.created_at.clone(),
                source,
            })?;
        let meta = serde_json::from_str(&self.meta).map_err(|e| DbError::InvalidMeta {
            activity_id: self.id,
            message: e.to_string(),
        })?;

        Ok(Activity {
            id: self.id,
            category: self.category,
            kind: self.kind,
            quantity: self.quantity,
            unit: self.unit,
            meta,
            emission_kg: self.emission_kg,
            date,
            created_at,
        })
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn truncate_to_seconds(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp.timestamp(), 0).unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn created_at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn insert(db: &mut Database, category: &str, kind: &str, kg: f64, date: NaiveDate) -> i64 {
        let activity = NewActivity::new(category, kind, 1.0);
        db.insert_activity(&activity, kg, date, created_at())
            .expect("insert activity")
            .id
    }

    fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({table})"))
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .map(Result::unwrap)
            .collect()
    }

    fn index_names(conn: &Connection, table: &str) -> HashSet<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA index_list({table})"))
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn open_in_memory_database() {
        let db = Database::open_in_memory().expect("open in-memory database");
        assert_eq!(db.count_activities().unwrap(), 0);
    }

    #[test]
    fn schema_matches_data_model() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(
            table_columns(&db.conn, "activities"),
            vec![
                "id",
                "category",
                "type",
                "quantity",
                "unit",
                "meta",
                "emission_kg",
                "date",
                "created_at"
            ]
        );
        assert!(index_names(&db.conn, "activities").contains("idx_activities_date"));
    }

    #[test]
    fn init_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cf.db");
        {
            let mut db = Database::open(&path).unwrap();
            insert(&mut db, "food", "vegan_day", 2.0, day(1));
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.count_activities().unwrap(), 1);
    }

    #[test]
    fn insert_returns_stored_record() {
        let mut db = Database::open_in_memory().unwrap();
        let mut activity = NewActivity::new("transport", "car", 20.0).with_unit("km");
        activity.meta = json!({"note": "commute"});

        let stored = db
            .insert_activity(&activity, 3.84, day(2), created_at())
            .unwrap();

        assert_eq!(stored.category, "transport");
        assert_eq!(stored.kind, "car");
        assert_eq!(stored.emission_kg, 3.84);
        assert_eq!(stored.date, day(2));

        let listed = db.list_activities().unwrap();
        assert_eq!(listed, vec![stored]);
        assert_eq!(listed[0].meta["note"], "commute");
    }

    #[test]
    fn insert_ignores_input_date_in_favor_of_resolved_date() {
        let mut db = Database::open_in_memory().unwrap();
        let activity = NewActivity::new("food", "vegan_day", 1.0).with_date(day(9));

        let stored = db
            .insert_activity(&activity, 2.0, day(3), created_at())
            .unwrap();
        assert_eq!(stored.date, day(3));
    }

    #[test]
    fn list_activities_returns_ordered_rows() {
        let mut db = Database::open_in_memory().unwrap();
        let late = insert(&mut db, "food", "vegan_day", 2.0, day(5));
        let early = insert(&mut db, "energy", "lpg", 3.0, day(1));
        let late_second = insert(&mut db, "transport", "bus", 1.05, day(5));

        let ids: Vec<i64> = db
            .list_activities()
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![early, late, late_second]);
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let mut db = Database::open_in_memory().unwrap();
        insert(&mut db, "food", "vegan_day", 2.0, day(1));
        let first = insert(&mut db, "food", "vegan_day", 2.0, day(2));
        let middle = insert(&mut db, "food", "vegan_day", 2.0, day(3));
        let last = insert(&mut db, "food", "vegan_day", 2.0, day(4));
        insert(&mut db, "food", "vegan_day", 2.0, day(5));

        let ids: Vec<i64> = db
            .list_activities_in_range(day(2), day(4))
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![first, middle, last]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let mut db = Database::open_in_memory().unwrap();
        insert(&mut db, "food", "vegan_day", 2.0, day(3));

        assert!(db.list_activities_in_range(day(4), day(2)).unwrap().is_empty());
    }

    #[test]
    fn delete_reports_whether_a_row_was_removed() {
        let mut db = Database::open_in_memory().unwrap();
        let id = insert(&mut db, "other", "offset", 5.0, day(1));

        assert!(db.delete_activity(id).unwrap());
        assert!(!db.delete_activity(id).unwrap());
        assert_eq!(db.count_activities().unwrap(), 0);
    }

    #[test]
    fn corrupt_date_surfaces_parse_error() {
        let db = Database::open_in_memory().unwrap();
        db.conn
            .execute(
                "INSERT INTO activities (category, type, date, created_at) VALUES ('food', 'vegan_day', 'someday', '2025-01-15T10:30:00Z')",
                [],
            )
            .unwrap();

        let err = db.list_activities().unwrap_err();
        assert!(matches!(err, DbError::DateParse { .. }), "got {err:?}");
    }
}
