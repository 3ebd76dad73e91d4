//! Service-level helpers that set up games without going through HTTP.

use backend_test_support::unique_helpers::unique_fact;
use whowrote_backend::db::txn::with_txn;
use whowrote_backend::domain::model::{Fact, FactId, Game, Player};
use whowrote_backend::extractors::session::SessionPlayer;
use whowrote_backend::repos::facts;
use whowrote_backend::services::game_flow::GameFlowService;
use whowrote_backend::services::games::GameService;
use whowrote_backend::state::app_state::AppState;
use whowrote_backend::AppError;

/// A player plus the session they would hold.
#[derive(Debug, Clone)]
pub struct Seat {
    pub player: Player,
    pub session: SessionPlayer,
}

impl Seat {
    fn new(player: Player) -> Self {
        let session = SessionPlayer {
            player_id: player.id,
            game_id: player.game_id,
            is_host: player.is_host,
        };
        Self { player, session }
    }

    pub fn id(&self) -> i64 {
        self.player.id
    }
}

#[derive(Debug, Clone)]
pub struct TestGame {
    pub token: String,
    pub game_id: i64,
    /// `seats[0]` is the host.
    pub seats: Vec<Seat>,
}

impl TestGame {
    pub fn host(&self) -> &Seat {
        &self.seats[0]
    }

    pub fn seat(&self, player_id: i64) -> &Seat {
        self.seats
            .iter()
            .find(|s| s.id() == player_id)
            .expect("player should be seated")
    }

    /// First seat that is none of `excluded`.
    pub fn other_than(&self, excluded: &[i64]) -> &Seat {
        self.seats
            .iter()
            .find(|s| !excluded.contains(&s.id()))
            .expect("enough players for the scenario")
    }
}

/// Create a game whose host is `names[0]` and join the rest.
pub async fn create_game_with_players(
    state: &AppState,
    names: &[&str],
) -> Result<TestGame, AppError> {
    let (host_name, guests) = names.split_first().expect("at least the host");
    let host_name = host_name.to_string();

    let (game, host) = with_txn(None, state, move |txn| {
        Box::pin(async move { GameService.create_game(txn, Some(host_name)).await })
    })
    .await?;

    let mut seats = vec![Seat::new(host)];
    for name in guests {
        let token = game.token.clone();
        let name = name.to_string();
        let joined = with_txn(None, state, move |txn| {
            Box::pin(async move { GameService.join_game(txn, &token, name).await })
        })
        .await?;
        seats.push(Seat::new(joined.output));
    }

    Ok(TestGame {
        token: game.token,
        game_id: game.id,
        seats,
    })
}

pub async fn submit_fact(
    state: &AppState,
    game: &TestGame,
    seat: &Seat,
    text: &str,
) -> Result<Fact, AppError> {
    let token = game.token.clone();
    let session = seat.session;
    let text = text.to_string();
    let result = with_txn(None, state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .submit_fact(txn, &token, session, text)
                .await
        })
    })
    .await?;
    Ok(result.output)
}

/// Every seated player submits `per_player` facts.
pub async fn submit_facts_for_all(
    state: &AppState,
    game: &TestGame,
    per_player: usize,
) -> Result<(), AppError> {
    for seat in &game.seats {
        for _ in 0..per_player {
            submit_fact(state, game, seat, &unique_fact(&seat.player.name)).await?;
        }
    }
    Ok(())
}

pub async fn start_game(state: &AppState, game: &TestGame) -> Result<(), AppError> {
    let token = game.token.clone();
    let session = game.host().session;
    with_txn(None, state, move |txn| {
        Box::pin(async move { GameFlowService.start_game(txn, &token, session).await })
    })
    .await?;
    Ok(())
}

/// Create, fill with 3 facts each, and start.
pub async fn started_game(state: &AppState, names: &[&str]) -> Result<TestGame, AppError> {
    let game = create_game_with_players(state, names).await?;
    submit_facts_for_all(state, &game, 3).await?;
    start_game(state, &game).await?;
    Ok(game)
}

pub async fn load_game(state: &AppState, game: &TestGame) -> Result<Game, AppError> {
    let token = game.token.clone();
    with_txn(None, state, move |txn| {
        Box::pin(async move { GameService.load_game(txn, &token).await })
    })
    .await
}

pub async fn load_fact(state: &AppState, fact_id: FactId) -> Result<Fact, AppError> {
    with_txn(None, state, move |txn| {
        Box::pin(async move { Ok(facts::require_fact(txn, fact_id).await?) })
    })
    .await
}

pub async fn list_facts(state: &AppState, game: &TestGame) -> Result<Vec<Fact>, AppError> {
    let game_id = game.game_id;
    with_txn(None, state, move |txn| {
        Box::pin(async move { Ok(facts::list_by_game(txn, game_id).await?) })
    })
    .await
}

/// The current fact of a running game.
pub async fn current_fact(state: &AppState, game: &TestGame) -> Result<Fact, AppError> {
    let loaded = load_game(state, game).await?;
    let fact_id = loaded.current_fact_id.expect("game should have a current fact");
    load_fact(state, fact_id).await
}

pub async fn guess(
    state: &AppState,
    game: &TestGame,
    seat: &Seat,
    fact_id: FactId,
    guessed_player_id: i64,
) -> Result<whowrote_backend::services::game_flow::GuessOutcome, AppError> {
    let token = game.token.clone();
    let session = seat.session;
    let result = with_txn(None, state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .submit_guess(txn, &token, session, fact_id, guessed_player_id)
                .await
        })
    })
    .await?;
    Ok(result.output)
}

pub async fn finish_story(
    state: &AppState,
    game: &TestGame,
    seat: &Seat,
    story: Option<&str>,
) -> Result<(), AppError> {
    let token = game.token.clone();
    let session = seat.session;
    let story = story.map(str::to_owned);
    with_txn(None, state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .finish_story(txn, &token, session, story)
                .await
        })
    })
    .await?;
    Ok(())
}

pub async fn rate(
    state: &AppState,
    game: &TestGame,
    seat: &Seat,
    fact_id: FactId,
    rating: i64,
) -> Result<(), AppError> {
    let token = game.token.clone();
    let session = seat.session;
    with_txn(None, state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .submit_rating(txn, &token, session, fact_id, rating)
                .await
        })
    })
    .await?;
    Ok(())
}

pub async fn kick(
    state: &AppState,
    game: &TestGame,
    by: &Seat,
    target_id: i64,
) -> Result<(), AppError> {
    let token = game.token.clone();
    let session = by.session;
    with_txn(None, state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .kick_player(txn, &token, session, target_id)
                .await
        })
    })
    .await?;
    Ok(())
}

pub async fn set_current_fact(
    state: &AppState,
    game: &TestGame,
    by: &Seat,
    fact_id: Option<FactId>,
) -> Result<(), AppError> {
    let token = game.token.clone();
    let session = by.session;
    with_txn(None, state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .set_current_fact(txn, &token, session, fact_id)
                .await
        })
    })
    .await?;
    Ok(())
}

pub async fn end_game(state: &AppState, game: &TestGame, by: &Seat) -> Result<(), AppError> {
    let token = game.token.clone();
    let session = by.session;
    with_txn(None, state, move |txn| {
        Box::pin(async move { GameFlowService.end_game(txn, &token, session).await })
    })
    .await?;
    Ok(())
}

/// Make a fact by `author_id` current (host action).
pub async fn force_fact_by(
    state: &AppState,
    game: &TestGame,
    author_id: i64,
) -> Result<Fact, AppError> {
    let fact = list_facts(state, game)
        .await?
        .into_iter()
        .find(|f| f.author_id == author_id && f.in_pool())
        .expect("author should have a fact in the pool");
    set_current_fact(state, game, game.host(), Some(fact.id)).await?;
    Ok(fact)
}
