//! Test helpers for generating unique test data
//!
//! Uses ULIDs so that names created by concurrently running tests never
//! collide.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique player display name that fits the 64 character limit.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_player_name;
///
/// let name = unique_player_name("alice");
/// assert!(name.starts_with("alice-"));
/// assert!(name.chars().count() <= 64);
/// ```
pub fn unique_player_name(prefix: &str) -> String {
    let mut name = unique_str(prefix);
    name.truncate(64);
    name
}

/// Generate a unique fact text, handy when assertions need to find a
/// specific fact in a snapshot.
pub fn unique_fact(prefix: &str) -> String {
    format!("{prefix} (#{})", Ulid::new())
}
