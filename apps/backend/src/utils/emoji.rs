//! Player emoji assignment.

pub const PLAYER_EMOJIS: [&str; 16] = [
    "🦁", "🐯", "🐻", "🦊", "🐼", "🐸", "🐵", "🐶", "🐱", "🦄", "🐷", "🐨", "🦓", "🦒", "🦉", "🦅",
];

pub const FALLBACK_EMOJI: &str = "🙂";

/// First emoji not already taken by someone on the roster.
pub fn next_free_emoji<'a, I>(taken: I) -> &'static str
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = taken.into_iter().collect();
    PLAYER_EMOJIS
        .iter()
        .copied()
        .find(|e| !taken.contains(e))
        .unwrap_or(FALLBACK_EMOJI)
}
