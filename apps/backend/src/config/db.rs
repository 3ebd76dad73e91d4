use std::env;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::AppError;

/// Runtime environment; decides which database name is used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Enforces the `_test` suffix on the database name
    Test,
}

/// Database engine backing the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    /// SQLite file at `SQLITE_DB_PATH`
    SqliteFile,
    /// Private in-memory SQLite; lives as long as the pool's single connection
    SqliteMemory,
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

impl DbKind {
    /// Parse `DB_KIND` values (`postgres`, `sqlite-file`, `sqlite-memory`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::Postgres),
            "sqlite-file" | "sqlite_file" => Some(Self::SqliteFile),
            "sqlite-memory" | "sqlite_memory" => Some(Self::SqliteMemory),
            _ => None,
        }
    }

    /// `DB_KIND` from the environment, defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("DB_KIND") {
            Ok(raw) => Self::parse(&raw)
                .ok_or_else(|| AppError::config(format!("Unsupported DB_KIND '{raw}'"))),
            Err(_) => Ok(Self::Postgres),
        }
    }
}

/// Builds the connection string for the given environment, engine and owner.
pub fn make_conn_spec(env: RuntimeEnv, kind: DbKind, owner: DbOwner) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => db_url(env, owner),
        DbKind::SqliteFile => {
            let path = must_var("SQLITE_DB_PATH")?;
            if env == RuntimeEnv::Test && !path.contains("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires the SQLite path to contain '_test', but got: '{path}'"
                )));
            }
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Builds a Postgres URL from environment variables based on environment and owner
pub fn db_url(env: RuntimeEnv, owner: DbOwner) -> Result<String, AppError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(env)?;
    let (username, password) = credentials(owner)?;

    let username = utf8_percent_encode(&username, NON_ALPHANUMERIC);
    let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(env: RuntimeEnv) -> Result<String, AppError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("WHOWROTE_OWNER_USER")?,
            must_var("WHOWROTE_OWNER_PASSWORD")?,
        )),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
