use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::room_token::is_valid_room_token;

/// Room token from the `{token}` path segment, shape-checked.
///
/// Existence is checked by the service inside its transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameToken(pub String);

impl GameToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_token(req: &HttpRequest) -> Result<GameToken, AppError> {
    let raw = req.match_info().get("token").ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidGameToken, "Missing game token")
    })?;
    let token = raw.trim().to_ascii_lowercase();
    if !is_valid_room_token(&token) {
        return Err(AppError::bad_request(
            ErrorCode::InvalidGameToken,
            format!("Invalid game token: {raw}"),
        ));
    }
    Ok(GameToken(token))
}

impl FromRequest for GameToken {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = parse_token(req);
        Box::pin(async move { result })
    }
}
