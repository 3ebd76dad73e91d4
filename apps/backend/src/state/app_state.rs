use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Application state shared by all workers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent only in DB-less unit tests)
    db: Option<DatabaseConnection>,
    /// Session token settings
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
        }
    }

    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self { db: None, security }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
