use whowrote_backend::config::db::DbKind;
use whowrote_backend::infra::state::build_state;
use whowrote_backend::state::app_state::AppState;
use whowrote_backend::state::security_config::SecurityConfig;
use whowrote_backend::AppError;

pub const TEST_JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET.as_bytes())
}

/// Fresh in-memory SQLite with the schema migrated. Every call is a new database.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(test_security())
        .build()
        .await
}
