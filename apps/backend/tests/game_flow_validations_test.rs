mod common;
mod support;

use support::build_test_state;
use support::factory::{
    create_game_with_players, current_fact, end_game, finish_story, guess, load_game, rate,
    start_game, started_game, submit_fact, submit_facts_for_all,
};
use whowrote_backend::db::txn::with_txn;
use whowrote_backend::domain::{Phase, ScoreReason};
use whowrote_backend::extractors::session::SessionPlayer;
use whowrote_backend::repos::guesses;
use whowrote_backend::services::games::GameService;
use whowrote_backend::services::scoreboard::ScoreboardService;
use whowrote_backend::{AppError, ErrorCode};

fn assert_code<T: std::fmt::Debug>(result: Result<T, AppError>, expected: ErrorCode) {
    match result {
        Err(e) => assert_eq!(e.code(), expected, "unexpected error: {e}"),
        Ok(v) => panic!("expected {expected:?}, got Ok({v:?})"),
    }
}

#[tokio::test]
async fn guessers_cannot_name_themselves_or_guess_their_own_fact() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game = started_game(&state, &["Ada", "Brian", "Cleo"]).await?;
    let fact = current_fact(&state, &game).await?;
    let author = game.seat(fact.author_id).clone();
    let guesser = game.other_than(&[author.id()]).clone();

    assert_code(
        guess(&state, &game, &author, fact.id, guesser.id()).await,
        ErrorCode::CannotGuessOwnFact,
    );
    assert_code(
        guess(&state, &game, &guesser, fact.id, guesser.id()).await,
        ErrorCode::CannotGuessSelf,
    );

    let third = game.other_than(&[author.id(), guesser.id()]).clone();
    guess(&state, &game, &guesser, fact.id, third.id()).await?;
    assert_code(
        guess(&state, &game, &guesser, fact.id, author.id()).await,
        ErrorCode::AlreadyGuessed,
    );

    Ok(())
}

#[tokio::test]
async fn only_the_first_correct_guess_resolves_a_fact() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game = started_game(&state, &["Ada", "Brian", "Cleo"]).await?;
    let fact = current_fact(&state, &game).await?;
    let author = game.seat(fact.author_id).clone();
    let first = game.other_than(&[author.id()]).clone();
    let second = game.other_than(&[author.id(), first.id()]).clone();

    let outcome = guess(&state, &game, &first, fact.id, author.id()).await?;
    assert!(outcome.is_correct);
    assert_code(
        guess(&state, &game, &second, fact.id, author.id()).await,
        ErrorCode::PhaseMismatch,
    );

    let token = game.token.clone();
    let game_id = game.game_id;
    let (log, all_guesses) = with_txn(None, &state, move |txn| {
        Box::pin(async move {
            let game = GameService.load_game(txn, &token).await?;
            let log = ScoreboardService.score_log(txn, &game).await?;
            let all_guesses = guesses::list_by_game(txn, game_id).await?;
            Ok((log, all_guesses))
        })
    })
    .await?;

    let correct_entries: Vec<_> = log
        .iter()
        .filter(|e| e.reason == ScoreReason::CorrectGuess)
        .collect();
    assert_eq!(correct_entries.len(), 1);
    assert_eq!(correct_entries[0].player_id, first.id());
    assert_eq!(
        all_guesses
            .iter()
            .filter(|g| g.fact_id == fact.id && g.is_correct)
            .count(),
        1
    );

    Ok(())
}

#[tokio::test]
async fn guessing_a_fact_that_is_not_current_is_a_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game = started_game(&state, &["Ada", "Brian"]).await?;
    let fact = current_fact(&state, &game).await?;
    let guesser = game.other_than(&[fact.author_id]).clone();

    let err = guess(&state, &game, &guesser, fact.id + 1_000, fact.author_id)
        .await
        .expect_err("stale fact id");
    assert_eq!(err.code(), ErrorCode::NotCurrentFact);
    assert_eq!(err.status().as_u16(), 409);

    Ok(())
}

#[tokio::test]
async fn start_needs_two_players_with_three_facts_each() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let solo = create_game_with_players(&state, &["Solo"]).await?;
    submit_facts_for_all(&state, &solo, 3).await?;
    assert_code(start_game(&state, &solo).await, ErrorCode::NotEnoughPlayers);

    let pair = create_game_with_players(&state, &["Ada", "Brian"]).await?;
    submit_fact(&state, &pair, pair.host(), "I once met a walrus").await?;
    assert_code(start_game(&state, &pair).await, ErrorCode::FactsIncomplete);
    assert_eq!(load_game(&state, &pair).await?.phase, Phase::Lobby);

    Ok(())
}

#[tokio::test]
async fn only_the_host_may_start() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let mut game = create_game_with_players(&state, &["Ada", "Brian"]).await?;
    submit_facts_for_all(&state, &game, 3).await?;

    // Make the guest the first seat so start_game acts as them.
    game.seats.swap(0, 1);
    assert_code(start_game(&state, &game).await, ErrorCode::NotHost);

    Ok(())
}

#[tokio::test]
async fn lobby_caps_facts_per_player() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game = create_game_with_players(&state, &["Ada", "Brian"]).await?;
    let host = game.host().clone();

    for text in ["one", "two", "three"] {
        submit_fact(&state, &game, &host, text).await?;
    }
    assert_code(
        submit_fact(&state, &game, &host, "four").await,
        ErrorCode::FactLimitReached,
    );
    assert_code(
        submit_fact(&state, &game, game.other_than(&[host.id()]), "   ").await,
        ErrorCode::InvalidFactText,
    );

    let loaded = load_game(&state, &game).await?;
    assert!(loaded.last_fact_added.is_some());

    Ok(())
}

#[tokio::test]
async fn storytellers_cannot_rate_themselves_and_ratings_stay_in_range() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game = started_game(&state, &["Ada", "Brian", "Cleo"]).await?;
    let fact = current_fact(&state, &game).await?;
    let author = game.seat(fact.author_id).clone();
    let guesser = game.other_than(&[author.id()]).clone();

    guess(&state, &game, &guesser, fact.id, author.id()).await?;

    assert_code(
        finish_story(&state, &game, &guesser, Some("not mine")).await,
        ErrorCode::NotStoryteller,
    );
    assert_code(
        rate(&state, &game, &guesser, fact.id, 2).await,
        ErrorCode::PhaseMismatch,
    );

    finish_story(&state, &game, &author, Some("mine")).await?;
    assert_code(
        rate(&state, &game, &author, fact.id, 3).await,
        ErrorCode::CannotRateOwnStory,
    );
    assert_code(
        rate(&state, &game, &guesser, fact.id, 4).await,
        ErrorCode::InvalidRating,
    );
    assert_code(
        rate(&state, &game, &guesser, fact.id, 0).await,
        ErrorCode::InvalidRating,
    );

    rate(&state, &game, &guesser, fact.id, 3).await?;
    assert_code(
        rate(&state, &game, &guesser, fact.id, 1).await,
        ErrorCode::AlreadyRated,
    );

    Ok(())
}

#[tokio::test]
async fn sessions_from_another_game_are_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game = started_game(&state, &["Ada", "Brian"]).await?;
    let other = create_game_with_players(&state, &["Zed", "Yan"]).await?;
    let fact = current_fact(&state, &game).await?;

    let mut intruder = game.other_than(&[fact.author_id]).clone();
    intruder.session = SessionPlayer {
        game_id: other.game_id,
        ..intruder.session
    };

    assert_code(
        guess(&state, &game, &intruder, fact.id, fact.author_id).await,
        ErrorCode::NotAPlayer,
    );

    Ok(())
}

#[tokio::test]
async fn nothing_moves_after_the_game_has_ended() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game = started_game(&state, &["Ada", "Brian"]).await?;
    let fact = current_fact(&state, &game).await?;
    let guesser = game.other_than(&[fact.author_id]).clone();

    end_game(&state, &game, game.host()).await?;
    let ended = load_game(&state, &game).await?;
    assert_eq!(ended.phase, Phase::Ended);

    let err = guess(&state, &game, &guesser, fact.id, fact.author_id)
        .await
        .expect_err("game is over");
    assert_eq!(err.code(), ErrorCode::GameEnded);
    assert_eq!(err.status().as_u16(), 409);

    assert_code(end_game(&state, &game, game.host()).await, ErrorCode::GameEnded);

    Ok(())
}
