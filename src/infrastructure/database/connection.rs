use diesel::{
    PgConnection,
    r2d2::{self, ConnectionManager},
};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Pool error: {0}")]
    Pool(String),
    #[error("Migration error: {0}")]
    Migration(String),
}

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

/// Builds a pool that pings each connection before handing it out. The
/// first connection is opened eagerly, so a bad URL fails here.
pub fn create_connection_pool(database_url: &str) -> Result<DbPool, DatabaseError> {
    if database_url.trim().is_empty() {
        return Err(DatabaseError::Configuration(
            "DATABASE_URL is empty".to_string(),
        ));
    }

    let manager = ConnectionManager::<PgConnection>::new(database_url);

    r2d2::Pool::builder()
        .max_size(2)
        .min_idle(Some(1))
        .test_on_check_out(true)
        .build(manager)
        .map_err(|e| DatabaseError::Pool(e.to_string()))
}

pub fn get_connection_from_pool(pool: &DbPool) -> Result<DbConnection, DatabaseError> {
    pool.get()
        .map_err(|e| DatabaseError::Pool(e.to_string()))
}

/// Creates both tables if they are missing. Returns how many migrations ran.
pub fn run_migrations(pool: &DbPool) -> Result<usize, DatabaseError> {
    let mut conn = get_connection_from_pool(pool)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    Ok(applied.len())
}
