use std::env;

use actix_cors::Cors;
use actix_web::http::header;

const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Parse `CORS_ALLOWED_ORIGINS` (comma separated), dropping empty, `null`
/// and non-http(s) entries.
pub fn parse_allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// CORS for the browser clients. Falls back to the local dev origins when
/// nothing valid is configured.
pub fn cors_middleware() -> Cors {
    let mut origins = parse_allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());
    if origins.is_empty() {
        origins = DEV_ORIGINS.iter().map(|s| s.to_string()).collect();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::IF_NONE_MATCH,
        ])
        // ETag must be readable for conditional polling
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::ETAG,
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::parse_allowed_origins;

    #[test]
    fn filters_invalid_origins() {
        let parsed = parse_allowed_origins(" https://play.example.com ,null,,ftp://x, http://localhost:5173");
        assert_eq!(
            parsed,
            vec![
                "https://play.example.com".to_string(),
                "http://localhost:5173".to_string()
            ]
        );
        assert!(parse_allowed_origins("").is_empty());
    }
}
