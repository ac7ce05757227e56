use super::DataStore;
use crate::error::{AgendaError, Result};
use crate::model::{Appointment, AppointmentDetails, AppointmentUpdate, ListOrder, ScheduledAt};
use log::{debug, info};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS appointments (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_name      TEXT NOT NULL,
        age               INTEGER,
        city              TEXT,
        exam_type         TEXT NOT NULL,
        requesting_doctor TEXT,
        scheduled_at      TEXT NOT NULL,
        scheduled_key     TEXT NOT NULL
    );
";

const SELECT_COLUMNS: &str =
    "SELECT id, patient_name, age, city, exam_type, requesting_doctor, scheduled_at FROM appointments";

/// Appointment storage backed by a single SQLite connection.
///
/// The connection is held for the lifetime of the store and closed on drop.
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`, creating parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        configure(&conn)?;
        debug!("Opened appointment database at {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        configure(&conn)?;
        Ok(Self { conn, path: None })
    }

    fn table_exists(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'appointments'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA synchronous = FULL;")?;
    Ok(())
}

fn order_clause(order: ListOrder) -> &'static str {
    match order {
        ListOrder::Chronological => "ORDER BY scheduled_key, id",
        ListOrder::Text => "ORDER BY scheduled_at, id",
    }
}

fn row_to_appointment(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    let scheduled: String = row.get(6)?;
    let scheduled_at = ScheduledAt::parse(&scheduled)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(Appointment::new(
        row.get(0)?,
        AppointmentDetails {
            patient_name: row.get(1)?,
            age: row.get(2)?,
            city: row.get(3)?,
            exam_type: row.get(4)?,
            requesting_doctor: row.get(5)?,
            scheduled_at,
        },
    ))
}

fn select_by_id(conn: &Connection, id: i64) -> Result<Option<Appointment>> {
    let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
    let found = conn
        .query_row(&sql, params![id], row_to_appointment)
        .optional()?;
    Ok(found)
}

impl DataStore for SqliteStore {
    fn initialize(&mut self) -> Result<()> {
        let existed = self.table_exists()?;
        self.conn.execute_batch(SCHEMA)?;
        if !existed {
            info!("Created appointments table in {}", self.location());
        }
        Ok(())
    }

    fn insert(&mut self, details: &AppointmentDetails) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO appointments (patient_name, age, city, exam_type, requesting_doctor,
             scheduled_at, scheduled_key)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                details.patient_name,
                details.age,
                details.city,
                details.exam_type,
                details.requesting_doctor,
                details.scheduled_at.to_string(),
                details.scheduled_at.sort_key(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted appointment {}", id);
        Ok(id)
    }

    fn get(&self, id: i64) -> Result<Option<Appointment>> {
        select_by_id(&self.conn, id)
    }

    fn list(&self, order: ListOrder) -> Result<Vec<Appointment>> {
        let sql = format!("{} {}", SELECT_COLUMNS, order_clause(order));
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_appointment)?;
        let appointments = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(appointments)
    }

    fn update(&mut self, id: i64, update: &AppointmentUpdate) -> Result<Appointment> {
        let tx = self.conn.transaction()?;
        let current = select_by_id(&tx, id)?.ok_or(AgendaError::NotFound(id))?;
        let details = update.apply_to(&current.details)?;

        tx.execute(
            "UPDATE appointments SET patient_name = ?1, age = ?2, city = ?3, exam_type = ?4,
             requesting_doctor = ?5, scheduled_at = ?6, scheduled_key = ?7
             WHERE id = ?8",
            params![
                details.patient_name,
                details.age,
                details.city,
                details.exam_type,
                details.requesting_doctor,
                details.scheduled_at.to_string(),
                details.scheduled_at.sort_key(),
                id,
            ],
        )?;
        tx.commit()?;
        debug!("Updated appointment {}", id);
        Ok(Appointment::new(id, details))
    }

    fn delete(&mut self, id: i64) -> Result<Appointment> {
        let tx = self.conn.transaction()?;
        let current = select_by_id(&tx, id)?.ok_or(AgendaError::NotFound(id))?;
        tx.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
        tx.commit()?;
        debug!("Deleted appointment {}", id);
        Ok(current)
    }

    fn location(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => ":memory:".to_string(),
        }
    }
}
