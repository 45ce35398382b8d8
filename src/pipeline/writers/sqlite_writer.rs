// src/pipeline/writers/sqlite_writer.rs

use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::data_model::ResumeRecord;
use crate::error::Result;
use crate::pipeline::writers::RecordSink;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS resumes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    email TEXT,
    phone TEXT,
    category TEXT,
    recommended_job TEXT,
    skills TEXT,
    education TEXT
)";

/// A row of the `resumes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredResume {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: String,
    pub recommended_job: String,
    pub skills: String,
    pub education: String,
}

/// Inserts one row per record into a SQLite `resumes` table.
pub struct SqliteSink {
    conn: Connection,
    label: String,
}

impl SqliteSink {
    /// Opens (or creates) the database file and makes sure the table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::with_connection(conn, format!("sqlite:{}", path.as_ref().display()))
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, "sqlite::memory:".to_string())
    }

    fn with_connection(conn: Connection, label: String) -> Result<Self> {
        conn.execute(CREATE_TABLE, [])?;
        debug!(sink = %label, "resumes table ready");
        Ok(SqliteSink { conn, label })
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM resumes", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn fetch_all(&self) -> Result<Vec<StoredResume>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, email, phone, category, recommended_job, skills, education
             FROM resumes ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(StoredResume {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                category: row.get(4)?,
                recommended_job: row.get(5)?,
                skills: row.get(6)?,
                education: row.get(7)?,
            })
        })?;
        let resumes = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(resumes)
    }
}

impl RecordSink for SqliteSink {
    fn name(&self) -> &str {
        &self.label
    }

    fn write_record(&mut self, record: &ResumeRecord) -> Result<()> {
        let extraction = &record.extraction;
        self.conn.execute(
            "INSERT INTO resumes (name, email, phone, category, recommended_job, skills, education)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                extraction.name,
                extraction.email,
                extraction.phone,
                record.classification.category,
                record.classification.recommended_job,
                extraction.skills_joined(),
                extraction.education_joined(),
            ],
        )?;
        Ok(())
    }
}
