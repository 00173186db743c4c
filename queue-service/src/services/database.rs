//! Database service for queue-service.

use crate::services::repository::{BankRepository, PatientRepository, RestaurantRepository};
use service_core::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

const CREATE_PATIENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS patients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        issue TEXT NOT NULL,
        appointment_date TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Waiting',
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_RESTAURANTS: &str = r#"
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        party_size INTEGER NOT NULL,
        reservation_time TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Waiting',
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_BANKS: &str = r#"
    CREATE TABLE IF NOT EXISTS banks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        service TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Waiting',
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) the SQLite database and build the pool.
    #[instrument(skip(database_url), fields(service = "queue-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to SQLite"
        );

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!("Invalid DATABASE_URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("SQLite connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the record tables that don't exist yet. Existing tables are
    /// left as they are.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        for (table, ddl) in [
            ("patients", CREATE_PATIENTS),
            ("restaurants", CREATE_RESTAURANTS),
            ("banks", CREATE_BANKS),
        ] {
            sqlx::query(ddl).execute(&self.pool).await.map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to create table {}: {}", table, e))
            })?;
        }
        info!("Database tables checked/created");
        Ok(())
    }

    pub fn patients(&self) -> PatientRepository {
        PatientRepository::new(self.pool.clone())
    }

    pub fn restaurants(&self) -> RestaurantRepository {
        RestaurantRepository::new(self.pool.clone())
    }

    pub fn banks(&self) -> BankRepository {
        BankRepository::new(self.pool.clone())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
