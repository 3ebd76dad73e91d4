use actix_web::web;

pub mod games;
pub mod health;

/// Mount every route. Shared by `main.rs` and the HTTP tests so both see the
/// same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
