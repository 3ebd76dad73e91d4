//! Error codes for the backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the `code` field of
//! Problem Details responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid session token
    UnauthorizedInvalidJwt,
    /// Session token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// Session belongs to a different game
    NotAPlayer,
    /// Player was removed from the game by the host
    PlayerKicked,
    /// Operation is reserved for the host
    NotHost,
    /// Operation is reserved for the current storyteller
    NotStoryteller,

    // Request Validation
    /// Malformed room token in the path
    InvalidGameToken,
    /// Malformed player id in the path
    InvalidPlayerId,
    /// Player name empty or too long
    InvalidPlayerName,
    /// Fact text empty or too long
    InvalidFactText,
    /// Story text too long
    InvalidStory,
    /// Rating outside 1..=3
    InvalidRating,
    /// Player already submitted the lobby fact allowance
    FactLimitReached,
    /// Fewer active players than required to start
    NotEnoughPlayers,
    /// Some player has not submitted exactly the required facts
    FactsIncomplete,
    /// Action not allowed in the current phase
    PhaseMismatch,
    /// Game is over; no further mutations accepted
    GameEnded,
    /// Fact is not the round's current fact
    NotCurrentFact,
    /// Author tried to guess their own fact
    CannotGuessOwnFact,
    /// Guess named the guesser themselves
    CannotGuessSelf,
    /// Author tried to rate their own story
    CannotRateOwnStory,
    /// Host tried to kick themselves or another host
    CannotKickHost,
    /// Requested fact is not eligible as the next current fact
    FactNotInPool,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Invalid or missing HTTP header
    InvalidHeader,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Player not found
    PlayerNotFound,
    /// Fact not found
    FactNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Player already guessed this fact
    AlreadyGuessed,
    /// Player already rated this story
    AlreadyRated,
    /// Another guess resolved the fact first
    FactAlreadyResolved,
    /// Room token collision
    TokenConflict,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,

    // Database Constraint Violations
    /// Unique constraint violation (SQLSTATE 23505)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503)
    FkViolation,
    /// Check constraint violation (SQLSTATE 23514)
    CheckViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    /// Internal server error
    Internal,
    /// Internal server error (explicit problem code)
    InternalError,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::NotAPlayer => "NOT_A_PLAYER",
            Self::PlayerKicked => "PLAYER_KICKED",
            Self::NotHost => "NOT_HOST",
            Self::NotStoryteller => "NOT_STORYTELLER",

            Self::InvalidGameToken => "INVALID_GAME_TOKEN",
            Self::InvalidPlayerId => "INVALID_PLAYER_ID",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::InvalidFactText => "INVALID_FACT_TEXT",
            Self::InvalidStory => "INVALID_STORY",
            Self::InvalidRating => "INVALID_RATING",
            Self::FactLimitReached => "FACT_LIMIT_REACHED",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::FactsIncomplete => "FACTS_INCOMPLETE",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::GameEnded => "GAME_ENDED",
            Self::NotCurrentFact => "NOT_CURRENT_FACT",
            Self::CannotGuessOwnFact => "CANNOT_GUESS_OWN_FACT",
            Self::CannotGuessSelf => "CANNOT_GUESS_SELF",
            Self::CannotRateOwnStory => "CANNOT_RATE_OWN_STORY",
            Self::CannotKickHost => "CANNOT_KICK_HOST",
            Self::FactNotInPool => "FACT_NOT_IN_POOL",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidHeader => "INVALID_HEADER",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::FactNotFound => "FACT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyGuessed => "ALREADY_GUESSED",
            Self::AlreadyRated => "ALREADY_RATED",
            Self::FactAlreadyResolved => "FACT_ALREADY_RESOLVED",
            Self::TokenConflict => "TOKEN_CONFLICT",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
