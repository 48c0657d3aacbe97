//! SQLite-backed inspection record store.
//!
//! One `InspectionStore` owns the connection for the whole process: opened
//! once in `main` and passed into each action. Records are append-only
//! evidence — there is no update operation, only insert, read and delete.
//!
//! Image paths live in a `record_images` child table (one row per path,
//! ordered by `position`) instead of a delimiter-joined column, so paths may
//! contain any character.

use crate::error::Result;
use crate::risk::RiskLevel;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// One stored inspection outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionRecord {
    /// Assigned by the store, never by the caller. AUTOINCREMENT: ids are
    /// never reused after deletion.
    pub id: i64,
    /// Display string fixed at write time, not re-derivable.
    pub timestamp: String,
    /// Classifier reply, stored verbatim.
    pub analysis: String,
    pub image_paths: Vec<String>,
    /// `"lat, lon"` text, or the sentinel when no fix was available.
    pub location: String,
    pub risk: RiskLevel,
}

pub struct InspectionStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl InspectionStore {
    /// Open (or create) the store at the given path.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        let store = InspectionStore {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = InspectionStore { conn, db_path: None };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE IF NOT EXISTS records (
                 id        INTEGER PRIMARY KEY AUTOINCREMENT,
                 timestamp TEXT NOT NULL,
                 analysis  TEXT NOT NULL,
                 location  TEXT NOT NULL,
                 risk      TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS record_images (
                 id        INTEGER PRIMARY KEY AUTOINCREMENT,
                 record_id INTEGER NOT NULL REFERENCES records(id) ON DELETE CASCADE,
                 position  INTEGER NOT NULL,
                 path      TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_record_images_record_id
                 ON record_images(record_id);",
        )?;
        Ok(())
    }

    /// Directory where staged image copies live, next to the database file.
    pub fn images_dir(&self) -> PathBuf {
        match &self.db_path {
            Some(db) => db
                .parent()
                .map(|p| p.join("images"))
                .unwrap_or_else(|| PathBuf::from("images")),
            None => PathBuf::from("images"),
        }
    }

    /// Append one record; returns the assigned id. The record row and its
    /// image rows commit in a single transaction.
    pub fn insert(
        &mut self,
        timestamp: &str,
        analysis: &str,
        image_paths: &[String],
        location: &str,
        risk: RiskLevel,
    ) -> Result<i64> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO records (timestamp, analysis, location, risk) VALUES (?1, ?2, ?3, ?4)",
            params![timestamp, analysis, location, risk.as_str()],
        )?;
        let id = tx.last_insert_rowid();
        for (position, path) in image_paths.iter().enumerate() {
            tx.execute(
                "INSERT INTO record_images (record_id, position, path) VALUES (?1, ?2, ?3)",
                params![id, position as i64, path],
            )?;
        }
        tx.commit()?;
        Ok(id)
    }

    /// All records, most recent first (id descending).
    pub fn list_all(&self) -> Result<Vec<InspectionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, analysis, location, risk FROM records ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let risk_text: String = row.get(4)?;
            Ok(InspectionRecord {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                analysis: row.get(2)?,
                location: row.get(3)?,
                // risk column only ever holds the three enumerated values
                risk: risk_text.parse().unwrap_or(RiskLevel::Low),
                image_paths: Vec::new(),
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }

        let mut img_stmt = self.conn.prepare(
            "SELECT path FROM record_images WHERE record_id = ?1 ORDER BY position",
        )?;
        for record in &mut records {
            let paths = img_stmt.query_map([record.id], |row| row.get::<_, String>(0))?;
            for path in paths {
                record.image_paths.push(path?);
            }
        }

        Ok(records)
    }

    /// Fetch a single record by id.
    pub fn get(&self, id: i64) -> Result<Option<InspectionRecord>> {
        Ok(self.list_all()?.into_iter().find(|r| r.id == id))
    }

    /// Delete the record with the given id, if present. Returns the image
    /// paths that belonged to it so the caller can remove staged copies; a
    /// missing id is a no-op and returns an empty list.
    pub fn delete_by_id(&mut self, id: i64) -> Result<Vec<String>> {
        let tx = self.conn.transaction()?;
        let mut paths = Vec::new();
        {
            let mut stmt = tx.prepare(
                "SELECT path FROM record_images WHERE record_id = ?1 ORDER BY position",
            )?;
            let rows = stmt.query_map([id], |row| row.get::<_, String>(0))?;
            for row in rows {
                paths.push(row?);
            }
        }
        tx.execute("DELETE FROM records WHERE id = ?1", [id])?;
        tx.commit()?;
        Ok(paths)
    }

    /// Record count, used by the list view header.
    pub fn count(&self) -> Result<i64> {
        let count =
            self.conn
                .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count)
    }
}
