use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Request bodies here are a name, a fact or a story; anything larger is abuse.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// JSON body extractor that reports failures as problem+json 400s.
///
/// An empty body reads as `{}`, so endpoints whose fields are all optional
/// (create game, finish story, set current fact) accept a bare POST.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let path = req.path().to_owned();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, path = %path, error = %e, "Failed to read request body");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            parse_body(&body).map(ValidatedJson).map_err(|e| {
                debug!(
                    trace_id = %trace_id,
                    path = %path,
                    error = %Redacted(&e.to_string()),
                    body_size = body.len(),
                    "Rejected request body"
                );
                AppError::bad_request(error_code_for(&e), describe_json_error(&e))
            })
        })
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(b"{}");
    }
    serde_json::from_slice(body)
}

/// Malformed JSON is a bad request; well-formed JSON with missing or
/// mistyped fields is a validation failure.
fn error_code_for(error: &serde_json::Error) -> ErrorCode {
    match error.classify() {
        Category::Data => ErrorCode::ValidationError,
        Category::Syntax | Category::Eof | Category::Io => ErrorCode::BadRequest,
    }
}

/// Sanitized detail; serde's own message may echo request content.
fn describe_json_error(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Missing or mistyped fields in request body".to_string(),
        Category::Io => "Could not read request body".to_string(),
    }
}
