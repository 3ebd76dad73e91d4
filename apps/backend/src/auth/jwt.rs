use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::SessionClaims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Mint a HS256 session token for a player, valid for `security.session_ttl`.
pub fn mint_session_token(
    player_id: i64,
    game_id: i64,
    is_host: bool,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;
    let exp = iat + security.session_ttl.as_secs() as i64;

    let claims = SessionClaims {
        sub: player_id.to_string(),
        gid: game_id,
        host: is_host,
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a session token and return its claims.
///
/// Expired tokens map to `UNAUTHORIZED_EXPIRED_JWT`, anything else that fails
/// to decode to `UNAUTHORIZED_INVALID_JWT`.
pub fn verify_session_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<SessionClaims, AppError> {
    let validation = Validation::new(security.algorithm);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{mint_session_token, verify_session_token};
    use crate::errors::ErrorCode;
    use crate::state::security_config::SecurityConfig;

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = security();
        let now = SystemTime::now();

        let token = mint_session_token(42, 7, true, now, &security).unwrap();
        let claims = verify_session_token(&token, &security).unwrap();

        assert_eq!(claims.player_id(), Some(42));
        assert_eq!(claims.gid, 7);
        assert!(claims.host);
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + 12 * 3600);
    }

    #[test]
    fn test_expired_token() {
        let security = security().with_session_ttl(Duration::from_secs(60));
        // issued two hours ago with a one-minute lifetime
        let now = SystemTime::now() - Duration::from_secs(2 * 3600);

        let token = mint_session_token(1, 1, false, now, &security).unwrap();
        let err = verify_session_token(&token, &security).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnauthorizedExpiredJwt);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = mint_session_token(1, 1, false, SystemTime::now(), &security()).unwrap();
        let other = SecurityConfig::new("a_completely_different_secret".as_bytes());
        let err = verify_session_token(&token, &other).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnauthorizedInvalidJwt);
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let err = verify_session_token("not.a.jwt", &security()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnauthorizedInvalidJwt);
    }
}
