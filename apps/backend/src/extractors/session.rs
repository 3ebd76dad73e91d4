use actix_web::dev::Payload;
use actix_web::{http::header, web, FromRequest, HttpRequest};

use crate::auth::jwt::verify_session_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Identity carried by a verified `Authorization: Bearer` session token.
///
/// Only the signature and expiry are checked here; membership in the game
/// named by the path is checked by the service under the game lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPlayer {
    pub player_id: i64,
    pub game_id: i64,
    pub is_host: bool,
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

fn resolve(req: &HttpRequest) -> Result<SessionPlayer, AppError> {
    let token = bearer_token(req)?;
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let claims = verify_session_token(token, &state.security)?;
    let player_id = claims
        .player_id()
        .ok_or_else(AppError::unauthorized_invalid_jwt)?;

    Ok(SessionPlayer {
        player_id,
        game_id: claims.gid,
        is_host: claims.host,
    })
}

impl FromRequest for SessionPlayer {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = resolve(req);
        Box::pin(async move { result })
    }
}
