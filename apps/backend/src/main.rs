use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use whowrote_backend::config::db::{DbKind, RuntimeEnv};
use whowrote_backend::config::server::ServerConfig;
use whowrote_backend::infra::state::build_state;
use whowrote_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use whowrote_backend::routes;
use whowrote_backend::state::security_config::SecurityConfig;
use whowrote_backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };

    let db_kind = match DbKind::from_env() {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "invalid database configuration");
            std::process::exit(1);
        }
    };

    let security_config =
        SecurityConfig::new(config.jwt_secret.as_bytes()).with_session_ttl(config.session_ttl);

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, db = ?db_kind, "starting whowrote backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
