//! SQLite persistence for sections, ratings, reviews, users, mandatory-course
//! completion and saved schedules.
//!
//! One connection is shared behind a mutex; every operation holds the lock
//! only for the duration of its statements. Handlers call into the store
//! from `spawn_blocking`.

mod courses;
mod mandatory;
mod reviews;
mod schedules;
mod users;

pub use crate::error::StoreError;

use crate::progress::{completion_columns, Catalog};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Store(..)")
    }
}

impl Store {
    /// Opens (or creates) the database at `path` and ensures every table exists.
    /// `:memory:` opens a private in-memory database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Store, StoreError> {
        let path = path.as_ref();
        if path != Path::new(":memory:") {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    fs::create_dir_all(dir)?;
                }
            }
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened course database");
        Store::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Store, StoreError> {
        Store::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Store, StoreError> {
        init_schema(&conn)?;
        Ok(Store { conn: Arc::new(Mutex::new(conn)) })
    }

    pub(crate) fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        let mut guard = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut guard)
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS courses (
            courseNumber INTEGER PRIMARY KEY AUTOINCREMENT,
            courseTitle TEXT NOT NULL,
            courseTopic TEXT NOT NULL,
            section TEXT NOT NULL,
            daysAndTimes TEXT NOT NULL,
            room TEXT NOT NULL,
            instructor TEXT NOT NULL,
            instructionMode TEXT NOT NULL,
            meetingDates TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS userData (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            userId TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS userScheduleCourses (
            scheduleId INTEGER PRIMARY KEY AUTOINCREMENT,
            userId TEXT NOT NULL,
            term TEXT NOT NULL,
            schedule TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS professorRating (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            instructor TEXT NOT NULL,
            ratingCount INTEGER NOT NULL DEFAULT 0,
            ratingSum INTEGER NOT NULL DEFAULT 0,
            avgRating REAL
        );

        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            instructor TEXT NOT NULL,
            userId TEXT NOT NULL,
            rating INTEGER NOT NULL,
            comment TEXT,
            createdAt TEXT NOT NULL
        );",
    )?;

    // one boolean column per catalog course, named CSCI_xxx / MATH_xxx
    let columns: Vec<String> = completion_columns(Catalog::standard())
        .into_iter()
        .map(|c| format!("\"{}\" INTEGER NOT NULL DEFAULT 0", c))
        .collect();
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS userMandatoryCourseCompleted (userId TEXT PRIMARY KEY, {});",
        columns.join(", ")
    ))?;
    Ok(())
}
