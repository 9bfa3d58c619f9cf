//! SQLite access layer for the climate observation dataset.
//!
//! The dataset is two tables, `measurement` and `station`, with a fixed
//! layout known at build time. This crate owns the connection and exposes
//! typed query methods returning plain record structs for the HTTP layer.
//!
//! # Usage
//!
//! ```rust
//! use clim_db::Database;
//!
//! let db = Database::new().unwrap();
//!
//! // Load CSV data (normally the two CSV exports of the dataset)
//! db.load_stations("station,name,latitude,longitude,elevation\nUSC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0\n").unwrap();
//! db.load_measurements("station,date,prcp,tobs\nUSC00519397,2010-01-01,0.08,65\n").unwrap();
//!
//! // Query typed results
//! let stations = db.query_stations().unwrap();
//! let observations = db.list_observations().unwrap();
//! assert_eq!(stations.len(), 1);
//! assert_eq!(observations.len(), 1);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `measurement` - Daily precipitation and temperature per station
//! - `station` - Station metadata
//!
//! A database opened with [`Database::open`] is read-only and its tables are
//! checked against the expected columns before any request is served.

pub mod schema;
mod loader;
mod queries;
pub mod models;

use anyhow::{anyhow, Context};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// SQLite database holding the climate dataset.
///
/// This struct is cheaply cloneable (via `Arc`) and can be shared across
/// request handlers running on different threads. The connection is guarded
/// by a mutex, so queries from concurrent requests are serialized.
///
/// # Example
///
/// ```rust
/// use clim_db::Database;
///
/// let db = Database::new().unwrap();
/// db.load_stations("station,name,latitude,longitude,elevation\nUSC00519281,\"WAIHEE 837.5, HI US\",21.45167,-157.84889,32.9\n").unwrap();
/// let stations = db.query_stations().unwrap();
/// assert_eq!(stations.len(), 1);
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self::from_connection(conn))
    }

    /// Create (or reopen for writing) a database file and apply the schema.
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open {} for writing", path.display()))?;
        conn.execute_batch(schema::create_schema())?;
        log::info!("db: opened {} for writing", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Open an existing database file read-only.
    ///
    /// Fails if either table is missing or lacks one of the expected columns.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("failed to open {}", path.display()))?;
        schema::verify_schema(&conn)
            .with_context(|| format!("{} does not hold the climate dataset", path.display()))?;
        log::info!("db: opened {} read-only", path.display());
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn connection(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }
}
