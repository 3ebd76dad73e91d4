//! Game rules and input limits.

use unicode_normalization::UnicodeNormalization;

use crate::domain::phase::Phase;
use crate::errors::domain::{DomainError, ValidationKind};

/// Facts each player must have before the game can start; also the lobby cap.
pub const FACTS_PER_PLAYER: usize = 3;
pub const MIN_PLAYERS: usize = 2;

pub const MAX_NAME_CHARS: usize = 64;
pub const MAX_FACT_CHARS: usize = 500;
pub const MAX_STORY_CHARS: usize = 2000;

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 3;

pub const DEFAULT_HOST_NAME: &str = "Host";

/// NFC-normalize and trim surrounding whitespace.
pub fn normalize_text(raw: &str) -> String {
    raw.nfc().collect::<String>().trim().to_string()
}

fn has_control_chars(s: &str) -> bool {
    s.chars().any(|c| c.is_control())
}

pub fn validate_player_name(raw: &str) -> Result<String, DomainError> {
    let name = normalize_text(raw);
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            format!("Name must be 1 to {MAX_NAME_CHARS} characters"),
        ));
    }
    if has_control_chars(&name) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            "Name must not contain control characters",
        ));
    }
    Ok(name)
}

pub fn validate_fact_text(raw: &str) -> Result<String, DomainError> {
    let text = normalize_text(raw);
    let len = text.chars().count();
    if len == 0 || len > MAX_FACT_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidFactText,
            format!("Fact must be 1 to {MAX_FACT_CHARS} characters"),
        ));
    }
    Ok(text)
}

/// Empty or whitespace-only stories are stored as absent.
pub fn validate_story(raw: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let story = normalize_text(raw);
    if story.is_empty() {
        return Ok(None);
    }
    if story.chars().count() > MAX_STORY_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidStory,
            format!("Story must be at most {MAX_STORY_CHARS} characters"),
        ));
    }
    Ok(Some(story))
}

pub fn validate_rating(raw: i64) -> Result<u8, DomainError> {
    match u8::try_from(raw) {
        Ok(r) if (RATING_MIN..=RATING_MAX).contains(&r) => Ok(r),
        _ => Err(DomainError::validation(
            ValidationKind::InvalidRating,
            format!("Rating must be between {RATING_MIN} and {RATING_MAX}"),
        )),
    }
}

/// In the lobby a player may hold at most [`FACTS_PER_PLAYER`] facts; once the
/// game is running facts can be appended freely until it ends.
pub fn check_can_add_fact(phase: Phase, facts_by_player: usize) -> Result<(), DomainError> {
    phase.ensure_open()?;
    if phase == Phase::Lobby && facts_by_player >= FACTS_PER_PLAYER {
        return Err(DomainError::validation(
            ValidationKind::FactLimitReached,
            format!("You already submitted {FACTS_PER_PLAYER} facts"),
        ));
    }
    Ok(())
}

/// `fact_counts` holds one entry per active player.
pub fn check_can_start(phase: Phase, fact_counts: &[usize]) -> Result<(), DomainError> {
    phase.expect(Phase::Lobby)?;
    if fact_counts.len() < MIN_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            format!("At least {MIN_PLAYERS} players are needed to start"),
        ));
    }
    let incomplete = fact_counts
        .iter()
        .filter(|&&n| n != FACTS_PER_PLAYER)
        .count();
    if incomplete > 0 {
        return Err(DomainError::validation(
            ValidationKind::FactsIncomplete,
            format!("{incomplete} player(s) do not have exactly {FACTS_PER_PLAYER} facts"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_normalized_and_bounded() {
        assert_eq!(validate_player_name("  Ana  ").unwrap(), "Ana");
        // decomposed e + combining acute becomes a single code point
        assert_eq!(validate_player_name("Rene\u{301}").unwrap(), "Ren\u{e9}");
        assert!(validate_player_name("   ").is_err());
        assert!(validate_player_name(&"x".repeat(65)).is_err());
        assert!(validate_player_name(&"x".repeat(64)).is_ok());
        assert!(validate_player_name("a\u{7}b").is_err());
    }

    #[test]
    fn fact_text_limits() {
        assert!(validate_fact_text("").is_err());
        assert!(validate_fact_text(&"y".repeat(501)).is_err());
        assert_eq!(validate_fact_text(" I met a llama ").unwrap(), "I met a llama");
    }

    #[test]
    fn story_is_optional() {
        assert_eq!(validate_story(None).unwrap(), None);
        assert_eq!(validate_story(Some("  ")).unwrap(), None);
        assert_eq!(validate_story(Some("It was 2009")).unwrap().as_deref(), Some("It was 2009"));
        assert!(validate_story(Some(&"z".repeat(2001))).is_err());
    }

    #[test]
    fn ratings_are_bounded() {
        assert!(validate_rating(0).is_err());
        assert_eq!(validate_rating(1).unwrap(), 1);
        assert_eq!(validate_rating(3).unwrap(), 3);
        assert!(validate_rating(4).is_err());
        assert!(validate_rating(-1).is_err());
    }

    #[test]
    fn lobby_caps_facts_but_running_game_does_not() {
        assert!(check_can_add_fact(Phase::Lobby, 2).is_ok());
        assert!(matches!(
            check_can_add_fact(Phase::Lobby, 3),
            Err(DomainError::Validation(ValidationKind::FactLimitReached, _))
        ));
        assert!(check_can_add_fact(Phase::Rating, 7).is_ok());
        assert!(matches!(
            check_can_add_fact(Phase::Ended, 0),
            Err(DomainError::Validation(ValidationKind::GameEnded, _))
        ));
    }

    #[test]
    fn start_requires_players_and_complete_facts() {
        assert!(matches!(
            check_can_start(Phase::Lobby, &[3]),
            Err(DomainError::Validation(ValidationKind::NotEnoughPlayers, _))
        ));
        assert!(matches!(
            check_can_start(Phase::Lobby, &[3, 2]),
            Err(DomainError::Validation(ValidationKind::FactsIncomplete, _))
        ));
        assert!(matches!(
            check_can_start(Phase::Guessing, &[3, 3]),
            Err(DomainError::Validation(ValidationKind::PhaseMismatch, _))
        ));
        assert!(check_can_start(Phase::Lobby, &[3, 3, 3]).is_ok());
    }
}
