//! Room token generation.
//!
//! Tokens are an animal name followed by two digits (`fox07`), short enough to
//! read out loud across a room.

use rand::seq::IndexedRandom;
use rand::Rng;

const ANIMALS: &[&str] = &[
    "lion", "tiger", "bear", "fox", "wolf", "panda", "koala", "zebra", "giraffe", "monkey", "cat",
    "dog", "mouse", "eagle", "owl", "shark", "whale", "dolphin", "rabbit", "frog", "horse",
    "sheep", "goat", "pig", "deer", "bat", "duck", "swan", "crab", "crow", "bee", "ant", "moose",
    "lynx", "otter", "camel", "yak", "mole", "elk",
];

/// Attempts before giving up on finding a free token.
pub const MAX_TOKEN_ATTEMPTS: usize = 64;

pub fn generate_room_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    let animal = ANIMALS.choose(rng).copied().unwrap_or("fox");
    let number: u8 = rng.random_range(0..100);
    format!("{animal}{number:02}")
}

/// Shape check used before touching the database: lowercase letters then two digits.
pub fn is_valid_room_token(token: &str) -> bool {
    let bytes = token.as_bytes();
    if !(4..=16).contains(&bytes.len()) {
        return false;
    }
    let (letters, digits) = bytes.split_at(bytes.len() - 2);
    letters.iter().all(u8::is_ascii_lowercase) && digits.iter().all(u8::is_ascii_digit)
}
