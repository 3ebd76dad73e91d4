// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_rule_violations_to_422() {
    let de = DomainError::validation(ValidationKind::CannotGuessSelf, "you wrote it");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::CannotGuessSelf);
    assert_eq!(app.status().as_u16(), 422);

    let other = DomainError::validation_other("bad field");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_phase_violations_to_409() {
    let de = DomainError::phase_mismatch("not guessing");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::PhaseMismatch);
    assert_eq!(app.status().as_u16(), 409);

    let ended = DomainError::validation(ValidationKind::GameEnded, "over");
    let app: AppError = ended.into();
    assert_eq!(app.code().as_str(), "GAME_ENDED");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_conflicts() {
    let dup = DomainError::conflict(ConflictKind::AlreadyGuessed, "one guess each");
    let app: AppError = dup.into();
    assert_eq!(app.code().as_str(), "ALREADY_GUESSED");
    assert_eq!(app.status().as_u16(), 409);

    let unique = DomainError::conflict(ConflictKind::Other("Unique".into()), "dup");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_VIOLATION");

    let other = DomainError::conflict(ConflictKind::Other("whatever".into()), "generic");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Game, "no game");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let nf = DomainError::not_found(NotFoundKind::Fact, "no fact");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "FACT_NOT_FOUND");
}

#[test]
fn maps_forbidden() {
    let de = DomainError::forbidden(ForbiddenKind::NotHost, "host only");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::NotHost);
    assert_eq!(app.status().as_u16(), 403);

    let de = DomainError::forbidden(ForbiddenKind::PlayerKicked, "removed");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::PlayerKicked);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let corr = DomainError::infra(InfraErrorKind::DataCorruption, "bad");
    let app: AppError = corr.into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "INTERNAL_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}
