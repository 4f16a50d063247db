use crate::errors::LoggyResult;
use crate::models::{LogEntry, NewLogEntry};
use log::{debug, info, warn, LevelFilter};
use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    ConnectOptions, Pool, Row, Sqlite,
};
use std::path::Path;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

// this macro collects migrations from the ./migrations folder at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone)]
pub struct Db {
    pub pool: Pool<Sqlite>,
}

impl Db {
    /// Opens (creating if needed) the database at `path` and applies pending
    /// migrations.
    pub async fn open(path: &Path) -> LoggyResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);
        options.log_statements(LevelFilter::Debug);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        debug!("found {} migrations", MIGRATOR.migrations.len());
        MIGRATOR.run(&pool).await?;

        let applied_version: i64 =
            sqlx::query_scalar("select ifnull(max(version), 0) from _sqlx_migrations")
                .fetch_one(&pool)
                .await?;
        info!(
            "opened {} (schema version {})",
            path.display(),
            applied_version
        );

        Ok(Db { pool })
    }

    pub async fn insert_log(&self, entry: &NewLogEntry) -> LoggyResult<i64> {
        let result = sqlx::query(
            "insert into logs (key, message, environment, app_version, device_name) values (?, ?, ?, ?, ?)",
        )
        .bind(entry.key.as_str())
        .bind(entry.message.as_str())
        .bind(entry.environment.as_str())
        .bind(entry.app_version.as_str())
        .bind(entry.device_name.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Returns up to `limit` records starting at `offset`, in insertion order.
    pub async fn query_logs(&self, offset: i64, limit: i64) -> LoggyResult<Vec<LogEntry>> {
        let rows = sqlx::query(
            "select key, message, environment, app_version, device_name, created_at, updated_at
             from logs order by id limit ? offset ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let created_at: chrono::NaiveDateTime = row.try_get("created_at")?;
            let updated_at: chrono::NaiveDateTime = row.try_get("updated_at")?;
            entries.push(LogEntry {
                key: row.try_get("key")?,
                message: row.try_get("message")?,
                environment: row.try_get("environment")?,
                app_version: row.try_get("app_version")?,
                device_name: row.try_get("device_name")?,
                created_at: created_at.and_utc(),
                updated_at: updated_at.and_utc(),
            });
        }
        Ok(entries)
    }

    pub async fn checkpoint(&self) -> LoggyResult<()> {
        sqlx::query("PRAGMA wal_checkpoint(FULL)")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Runs `PRAGMA wal_checkpoint(FULL)` every `interval` until `shutdown`
/// becomes true or its sender is dropped.
pub fn spawn_wal_checkpointer(
    db: Db,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // the first tick completes immediately
        ticker.tick().await;
        info!("starting WAL checkpointer every {}s", interval.as_secs());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match db.checkpoint().await {
                        Ok(()) => debug!("checkpoint successful"),
                        Err(e) => warn!("error during checkpoint: {}", e),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("stopping WAL checkpointer");
                        break;
                    }
                }
            }
        }
    })
}
