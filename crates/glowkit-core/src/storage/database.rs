//! SQLite-based persistence.
//!
//! Provides persistent storage for:
//! - Credited workout minutes (one row per stopwatch reset)
//! - Key-value store for application state (persisted timer engines,
//!   style-tip rotation index)

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::DatabaseError;

/// One credited workout, written when the stopwatch is reset with at
/// least one whole elapsed minute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: i64,
    pub minutes: u64,
    pub laps: u64,
    pub credited_at: DateTime<Utc>,
}

/// Aggregated workout minutes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkoutStats {
    pub total_workouts: u64,
    pub total_minutes: u64,
    pub today_workouts: u64,
    pub today_minutes: u64,
}

/// SQLite database for Glowkit state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/glowkit/glowkit.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
            .join("glowkit.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path,
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS workouts (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                minutes     INTEGER NOT NULL,
                laps        INTEGER NOT NULL DEFAULT 0,
                credited_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_workouts_credited_at ON workouts(credited_at);",
        )?;
        Ok(())
    }

    /// Record minutes credited by a stopwatch reset.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_workout(
        &self,
        minutes: u64,
        laps: u64,
        credited_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO workouts (minutes, laps, credited_at) VALUES (?1, ?2, ?3)",
            params![minutes, laps, credited_at.to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn workout_stats(&self) -> Result<WorkoutStats, DatabaseError> {
        let mut stats = WorkoutStats::default();

        self.conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(minutes), 0) FROM workouts",
                [],
                |row| {
                    stats.total_workouts = row.get(0)?;
                    stats.total_minutes = row.get(1)?;
                    Ok(())
                },
            )?;

        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(minutes), 0) FROM workouts
                 WHERE credited_at >= ?1",
                params![format!("{today}T00:00:00+00:00")],
                |row| {
                    stats.today_workouts = row.get(0)?;
                    stats.today_minutes = row.get(1)?;
                    Ok(())
                },
            )?;

        Ok(stats)
    }

    pub fn recent_workouts(&self, limit: u32) -> Result<Vec<WorkoutRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, minutes, laps, credited_at FROM workouts
             ORDER BY credited_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            let credited_at: String = row.get(3)?;
            Ok(WorkoutRecord {
                id: row.get(0)?,
                minutes: row.get(1)?,
                laps: row.get(2)?,
                credited_at: credited_at
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_set_get_overwrite_delete() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("missing").unwrap(), None);

        db.kv_set("engine", "{}").unwrap();
        assert_eq!(db.kv_get("engine").unwrap().as_deref(), Some("{}"));

        db.kv_set("engine", "{\"state\":\"idle\"}").unwrap();
        assert_eq!(
            db.kv_get("engine").unwrap().as_deref(),
            Some("{\"state\":\"idle\"}")
        );

        db.kv_delete("engine").unwrap();
        assert_eq!(db.kv_get("engine").unwrap(), None);
    }

    #[test]
    fn workout_stats_accumulate() {
        let db = Database::open_memory().unwrap();
        db.record_workout(25, 3, Utc::now()).unwrap();
        db.record_workout(40, 0, Utc::now()).unwrap();

        let stats = db.workout_stats().unwrap();
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.total_minutes, 65);
        assert_eq!(stats.today_workouts, 2);
        assert_eq!(stats.today_minutes, 65);
    }

    #[test]
    fn recent_workouts_limited_and_ordered() {
        let db = Database::open_memory().unwrap();
        for minutes in [10, 20, 30] {
            db.record_workout(minutes, 0, Utc::now()).unwrap();
        }
        let recent = db.recent_workouts(2).unwrap();
        assert_eq!(recent.len(), 2);
    }
}
