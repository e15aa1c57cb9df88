//! # Relational Store
//!
//! One table, `schools`. Rows are only ever inserted and listed.
//!
//! `created_at` is filled by SQLite with millisecond precision; listing
//! orders by it descending, with `id` breaking ties.

use crate::error::RegistryError;
use crate::school::{NewSchool, School, SchoolId};
use rusqlite::{Connection, Row, params};
use std::path::Path;

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS schools (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT NOT NULL,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    contact TEXT NOT NULL,
    image TEXT NOT NULL,
    email_id TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_schools_created_at ON schools(created_at);
"#;

const SELECT_COLUMNS: &str =
    "id, name, address, city, state, contact, email_id, image, created_at";

/// Storage operations the registry needs.
pub trait SchoolStore {
    /// Create the schema if it does not exist. Idempotent.
    fn initialize(&self) -> Result<(), RegistryError>;

    /// Insert a row. Returns the generated id.
    fn insert(&mut self, school: &NewSchool) -> Result<SchoolId, RegistryError>;

    /// All rows, newest first.
    fn list_recent(&self) -> Result<Vec<School>, RegistryError>;

    /// Number of rows.
    fn count(&self) -> Result<usize, RegistryError>;
}

/// SQLite-backed store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, RegistryError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

fn row_to_school(row: &Row<'_>) -> rusqlite::Result<School> {
    Ok(School {
        id: SchoolId(row.get(0)?),
        name: row.get(1)?,
        address: row.get(2)?,
        city: row.get(3)?,
        state: row.get(4)?,
        contact: row.get(5)?,
        email_id: row.get(6)?,
        image: row.get(7)?,
        created_at: row.get(8)?,
    })
}

impl SchoolStore for SqliteStore {
    fn initialize(&self) -> Result<(), RegistryError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn insert(&mut self, school: &NewSchool) -> Result<SchoolId, RegistryError> {
        self.conn.execute(
            "INSERT INTO schools (name, address, city, state, contact, image, email_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                school.name,
                school.address,
                school.city,
                school.state,
                school.contact,
                school.image,
                school.email_id,
            ],
        )?;
        Ok(SchoolId(self.conn.last_insert_rowid()))
    }

    fn list_recent(&self) -> Result<Vec<School>, RegistryError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM schools ORDER BY created_at DESC, id DESC"
        ))?;
        let schools = stmt
            .query_map([], row_to_school)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(schools)
    }

    fn count(&self) -> Result<usize, RegistryError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM schools", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
