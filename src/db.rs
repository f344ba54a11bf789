use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::query_dsl::methods::ExecuteDsl;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use std::time::Duration;
use tracing::warn;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// How many times a write is retried when SQLite reports the database locked
const MAX_WRITE_ATTEMPTS: u32 = 5;
/// Base delay between retries; grows linearly with the attempt number
const RETRY_BASE_DELAY_MS: u64 = 50;

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        // ON DELETE CASCADE only fires with foreign_keys on; SQLite defaults
        // to off, so every connection has to opt in
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Creates a connection pool for the given database URL
///
/// ### Arguments
///
/// * `database_url` - The SQLite database URL or file path
///
/// ### Panics
///
/// Panics if the pool cannot be created, e.g. when the database file
/// cannot be opened.
pub fn init_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .expect("Failed to create pool.")
}

/// Extension trait for running write statements with retry on lock contention
///
/// SQLite allows a single writer at a time; under concurrent load a write can
/// fail with "database is locked" even with a busy timeout set. Queries are
/// cloned per attempt and retried with a linearly growing delay before the
/// error is handed back to the caller.
#[allow(async_fn_in_trait)]
pub trait ExecuteWithRetry: ExecuteDsl<SqliteConnection> + Clone {
    async fn execute_with_retry(self, conn: &mut SqliteConnection) -> QueryResult<usize> {
        let mut attempt: u32 = 1;
        loop {
            match ExecuteDsl::execute(self.clone(), conn) {
                Err(DieselError::DatabaseError(_, ref info))
                    if info.message().contains("database is locked")
                        && attempt < MAX_WRITE_ATTEMPTS =>
                {
                    warn!("Database locked, retrying write (attempt {})", attempt);
                    tokio::time::sleep(Duration::from_millis(
                        RETRY_BASE_DELAY_MS * u64::from(attempt),
                    ))
                    .await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

impl<T> ExecuteWithRetry for T where T: ExecuteDsl<SqliteConnection> + Clone {}
