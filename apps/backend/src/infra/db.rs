use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{make_conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;

const PG_CONNECT_ATTEMPTS: u32 = 5;
const PG_CONNECT_INTERVAL_MS: u64 = 500;

fn db_engine(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Mask the password in a connection string for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth, host)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth.rfind(':') {
        // scheme "postgresql:" has its colon before "//"; only mask user:pass
        Some(colon) if auth[..colon].contains("//") => format!("{}:***@{host}", &auth[..colon]),
        _ => url.to_string(),
    }
}

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt < max_attempts => {
                warn!(attempt, max_attempts, interval_ms, error = %e, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn connect_options(url: &str, kind: DbKind) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_string());
    opt.sqlx_logging(false);
    match kind {
        DbKind::Postgres => {
            opt.max_connections(16)
                .min_connections(1)
                .acquire_timeout(Duration::from_secs(5));
        }
        // A SQLite pool must not recycle its only connection; for :memory: that
        // would drop the whole database.
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            opt.max_connections(1)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(u32::MAX as u64))
                .max_lifetime(Duration::from_secs(u32::MAX as u64));
        }
    }
    opt
}

/// Connect without running migrations.
pub async fn connect_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, kind, owner)?;
    let opt = connect_options(&url, kind);

    info!(
        engine = db_engine(kind),
        url = %sanitize_db_url(&url),
        env = ?env,
        "connecting to database"
    );

    let connect = || {
        let opt = opt.clone();
        async move {
            Database::connect(opt)
                .await
                .map_err(|e| AppError::config(format!("failed to connect to database: {e}")))
        }
    };

    if kind == DbKind::Postgres {
        retry_connection(connect, PG_CONNECT_ATTEMPTS, PG_CONNECT_INTERVAL_MS).await
    } else {
        connect().await
    }
}

/// Connect and bring the schema up to date. Single entrypoint for the server and tests.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(env, kind, owner).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))?;
    Ok(conn)
}

/// Run an arbitrary migration command with owner credentials (used by the migration CLI).
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    kind: DbKind,
    command: MigrationCommand,
) -> Result<(), AppError> {
    if kind == DbKind::SqliteMemory {
        return Err(AppError::config(
            "in-memory SQLite is ephemeral; migrations against it are pointless",
        ));
    }
    let conn = connect_db(env, kind, DbOwner::Owner).await?;
    migrate(&conn, command)
        .await
        .map_err(|e| AppError::config(format!("{command:?} failed: {e}")))
}
