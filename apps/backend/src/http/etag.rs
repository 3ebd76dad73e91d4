//! ETag helpers for conditional polling of the game state.

/// Generate an ETag for a game resource.
///
/// Format: `"game-{id}-v{version}"` (with quotes, as required by HTTP spec).
/// Every mutation bumps the version, so the tag changes on every write.
pub fn game_etag(id: i64, version: i32) -> String {
    format!(r#""game-{id}-v{version}""#)
}

/// Whether an `If-None-Match` header value matches `etag`.
///
/// Handles `*`, comma-separated lists, and weak validators (`W/"..."`),
/// compared weakly as RFC 9110 prescribes for `If-None-Match`.
pub fn if_none_match_matches(header_value: &str, etag: &str) -> bool {
    let strip_weak = |s: &str| s.trim().trim_start_matches("W/").to_string();
    let target = strip_weak(etag);
    header_value
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || strip_weak(candidate) == target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_etag_format() {
        assert_eq!(game_etag(123, 5), r#""game-123-v5""#);
        assert_eq!(game_etag(1, 0), r#""game-1-v0""#);
    }

    #[test]
    fn test_if_none_match() {
        let etag = game_etag(9, 4);
        assert!(if_none_match_matches(r#""game-9-v4""#, &etag));
        assert!(if_none_match_matches(r#"W/"game-9-v4""#, &etag));
        assert!(if_none_match_matches(r#""game-9-v3", "game-9-v4""#, &etag));
        assert!(if_none_match_matches("*", &etag));
        assert!(!if_none_match_matches(r#""game-9-v3""#, &etag));
        assert!(!if_none_match_matches(r#""game-19-v4""#, &etag));
        assert!(!if_none_match_matches("", &etag));
    }
}
