use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_SESSION_TTL_HOURS: u64 = 12;

/// Process settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub session_ttl: Duration,
}

impl ServerConfig {
    /// Reads `BACKEND_HOST`, `BACKEND_PORT`, `BACKEND_JWT_SECRET` and `SESSION_TTL_HOURS`.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'")))?,
            Err(_) => DEFAULT_PORT,
        };

        let jwt_secret = env::var("BACKEND_JWT_SECRET")
            .map_err(|_| AppError::config("BACKEND_JWT_SECRET must be set"))?;
        if jwt_secret.trim().is_empty() {
            return Err(AppError::config("BACKEND_JWT_SECRET must not be empty"));
        }

        let ttl_hours = match env::var("SESSION_TTL_HOURS") {
            Ok(raw) => raw.parse::<u64>().ok().filter(|h| *h > 0).ok_or_else(|| {
                AppError::config(format!("SESSION_TTL_HOURS must be a positive integer, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_SESSION_TTL_HOURS,
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            session_ttl: Duration::from_secs(ttl_hours * 3600),
        })
    }
}
