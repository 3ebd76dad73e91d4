//! Per-request tracing span middleware.
//!
//! Creates a span named "request" carrying `trace_id`, `method`, `path` and,
//! for `/api/games/{token}/...` requests, the room token as `game`. Game-flow
//! logs emitted inside handlers inherit these fields. Must sit inside
//! `RequestTrace`, which stores the trace id this span reads.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{field, info_span, Instrument};

const GAMES_PREFIX: &str = "/api/games/";

/// Room token segment of a games path. Routing has not run yet when this
/// middleware sees the request, so the path is split by hand.
pub(crate) fn room_token_from_path(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(GAMES_PREFIX)?;
    let token = rest.split('/').next()?;
    (!token.is_empty()).then_some(token)
}

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "missing-trace-id".to_string());

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
            game = field::Empty,
        );
        if let Some(token) = room_token_from_path(req.path()) {
            span.record("game", token);
        }

        Box::pin(self.service.call(req).instrument(span))
    }
}

#[cfg(test)]
mod tests {
    use super::room_token_from_path;

    #[test]
    fn room_token_is_read_from_game_paths() {
        assert_eq!(room_token_from_path("/api/games/fox07/state"), Some("fox07"));
        assert_eq!(room_token_from_path("/api/games/fox07"), Some("fox07"));
        assert_eq!(room_token_from_path("/api/games"), None);
        assert_eq!(room_token_from_path("/api/games/"), None);
        assert_eq!(room_token_from_path("/health"), None);
    }
}
