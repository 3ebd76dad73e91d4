//! Game-related HTTP routes.

use std::time::SystemTime;

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::mint_session_token;
use crate::db::txn::with_txn;
use crate::domain::model::{FactId, Game, Player, PlayerId};
use crate::domain::phase::Phase;
use crate::domain::round::RoundResolution;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::game_token::GameToken;
use crate::extractors::session::SessionPlayer;
use crate::extractors::validated_json::ValidatedJson;
use crate::http::etag::{game_etag, if_none_match_matches};
use crate::services::game_flow::{GameFlowMutationResult, GameFlowService};
use crate::services::games::GameService;
use crate::services::scoreboard::ScoreboardService;
use crate::services::stats::StatsService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateGameRequest {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JoinGameRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SubmitFactRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
struct SubmitGuessRequest {
    fact_id: FactId,
    guessed_player_id: PlayerId,
}

#[derive(Debug, Deserialize)]
struct FinishStoryRequest {
    #[serde(default)]
    story: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitRatingRequest {
    fact_id: FactId,
    rating: i64,
}

#[derive(Debug, Deserialize)]
struct SetCurrentFactRequest {
    #[serde(default)]
    fact_id: Option<FactId>,
}

#[derive(Debug, Serialize)]
struct SessionPlayerView {
    id: PlayerId,
    name: String,
    emoji: String,
    is_host: bool,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    token: String,
    player: SessionPlayerView,
    session_token: String,
}

#[derive(Debug, Serialize)]
struct MutationAck {
    phase: Phase,
    version: i32,
}

#[derive(Debug, Serialize)]
struct FactCreatedResponse {
    fact_id: FactId,
    text: String,
    phase: Phase,
    version: i32,
}

#[derive(Debug, Serialize)]
struct GuessResponse {
    is_correct: bool,
    resolution: RoundResolution,
    phase: Phase,
    version: i32,
}

fn session_response(
    state: &AppState,
    status: StatusCode,
    game: &Game,
    player: Player,
) -> Result<HttpResponse, AppError> {
    let session_token = mint_session_token(
        player.id,
        game.id,
        player.is_host,
        SystemTime::now(),
        &state.security,
    )?;

    Ok(HttpResponse::build(status)
        .insert_header((ETAG, game_etag(game.id, game.version)))
        .json(SessionResponse {
            token: game.token.clone(),
            player: SessionPlayerView {
                id: player.id,
                name: player.name,
                emoji: player.emoji,
                is_host: player.is_host,
            },
            session_token,
        }))
}

/// 200 with the new phase/version and the ETag a client should poll with next.
fn mutation_response<T>(
    result: &GameFlowMutationResult<T>,
    body: impl Serialize,
) -> HttpResponse {
    let game = &result.final_game;
    HttpResponse::Ok()
        .insert_header((ETAG, game_etag(game.id, game.version)))
        .json(body)
}

fn ack<T>(result: &GameFlowMutationResult<T>) -> HttpResponse {
    mutation_response(
        result,
        MutationAck {
            phase: result.final_game.phase,
            version: result.final_version(),
        },
    )
}

/// POST /api/games
async fn create_game(
    http_req: HttpRequest,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;

    let (game, host) = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { GameService.create_game(txn, name).await })
    })
    .await?;

    session_response(&app_state, StatusCode::CREATED, &game, host)
}

/// POST /api/games/{token}/join
async fn join_game(
    http_req: HttpRequest,
    token: GameToken,
    body: ValidatedJson<JoinGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;

    let result = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { GameService.join_game(txn, token.as_str(), name).await })
    })
    .await?;

    session_response(&app_state, StatusCode::CREATED, &result.final_game, result.output)
}

enum StateOutcome {
    NotModified(String),
    Fresh(String, Box<crate::domain::snapshot::GameSnapshot>),
}

/// GET /api/games/{token}/state
///
/// The polled snapshot. A matching `If-None-Match` short-circuits to
/// `304 Not Modified` before any of the snapshot queries run.
async fn get_state(
    http_req: HttpRequest,
    token: GameToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let if_none_match = http_req
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let outcome = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let game = GameService.load_game(txn, token.as_str()).await?;
            let etag = game_etag(game.id, game.version);

            if if_none_match
                .as_deref()
                .is_some_and(|header| if_none_match_matches(header, &etag))
            {
                return Ok(StateOutcome::NotModified(etag));
            }

            let snapshot = GameService.snapshot(txn, &game).await?;
            Ok(StateOutcome::Fresh(etag, Box::new(snapshot)))
        })
    })
    .await?;

    Ok(match outcome {
        StateOutcome::NotModified(etag) => HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag))
            .finish(),
        StateOutcome::Fresh(etag, snapshot) => HttpResponse::Ok()
            .insert_header((ETAG, etag))
            .json(snapshot),
    })
}

/// POST /api/games/{token}/facts
async fn submit_fact(
    http_req: HttpRequest,
    token: GameToken,
    session: SessionPlayer,
    body: ValidatedJson<SubmitFactRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let text = body.into_inner().text;

    let result = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .submit_fact(txn, token.as_str(), session, text)
                .await
        })
    })
    .await?;

    let body = FactCreatedResponse {
        fact_id: result.output.id,
        text: result.output.text.clone(),
        phase: result.final_game.phase,
        version: result.final_version(),
    };
    let mut response = mutation_response(&result, body);
    *response.status_mut() = StatusCode::CREATED;
    Ok(response)
}

/// POST /api/games/{token}/guesses
async fn submit_guess(
    http_req: HttpRequest,
    token: GameToken,
    session: SessionPlayer,
    body: ValidatedJson<SubmitGuessRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let SubmitGuessRequest {
        fact_id,
        guessed_player_id,
    } = body.into_inner();

    let result = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .submit_guess(txn, token.as_str(), session, fact_id, guessed_player_id)
                .await
        })
    })
    .await?;

    let body = GuessResponse {
        is_correct: result.output.is_correct,
        resolution: result.output.resolution,
        phase: result.final_game.phase,
        version: result.final_version(),
    };
    Ok(mutation_response(&result, body))
}

/// POST /api/games/{token}/story/finish
async fn finish_story(
    http_req: HttpRequest,
    token: GameToken,
    session: SessionPlayer,
    body: ValidatedJson<FinishStoryRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let story = body.into_inner().story;

    let result = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .finish_story(txn, token.as_str(), session, story)
                .await
        })
    })
    .await?;

    Ok(ack(&result))
}

/// POST /api/games/{token}/ratings
async fn submit_rating(
    http_req: HttpRequest,
    token: GameToken,
    session: SessionPlayer,
    body: ValidatedJson<SubmitRatingRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let SubmitRatingRequest { fact_id, rating } = body.into_inner();

    let result = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .submit_rating(txn, token.as_str(), session, fact_id, rating)
                .await
        })
    })
    .await?;

    Ok(ack(&result))
}

/// DELETE /api/games/{token}/players/{player_id}
async fn kick_player(
    http_req: HttpRequest,
    token: GameToken,
    session: SessionPlayer,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let target_id = http_req
        .match_info()
        .get("player_id")
        .and_then(|raw| raw.parse::<PlayerId>().ok())
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::InvalidPlayerId, "Player id must be an integer")
        })?;

    let result = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .kick_player(txn, token.as_str(), session, target_id)
                .await
        })
    })
    .await?;

    Ok(ack(&result))
}

/// POST /api/games/{token}/start
async fn start_game(
    http_req: HttpRequest,
    token: GameToken,
    session: SessionPlayer,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { GameFlowService.start_game(txn, token.as_str(), session).await })
    })
    .await?;

    Ok(ack(&result))
}

/// POST /api/games/{token}/end
async fn end_game(
    http_req: HttpRequest,
    token: GameToken,
    session: SessionPlayer,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { GameFlowService.end_game(txn, token.as_str(), session).await })
    })
    .await?;

    Ok(ack(&result))
}

/// POST /api/games/{token}/current-fact
async fn set_current_fact(
    http_req: HttpRequest,
    token: GameToken,
    session: SessionPlayer,
    body: ValidatedJson<SetCurrentFactRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let fact_id = body.into_inner().fact_id;

    let result = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            GameFlowService
                .set_current_fact(txn, token.as_str(), session, fact_id)
                .await
        })
    })
    .await?;

    Ok(ack(&result))
}

/// GET /api/games/{token}/scoreboard
async fn get_scoreboard(
    http_req: HttpRequest,
    token: GameToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let rows = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let game = GameService.load_game(txn, token.as_str()).await?;
            ScoreboardService.scoreboard(txn, &game).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/games/{token}/score-log
async fn get_score_log(
    http_req: HttpRequest,
    token: GameToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let entries = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let game = GameService.load_game(txn, token.as_str()).await?;
            ScoreboardService.score_log(txn, &game).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/games/{token}/stats
async fn get_stats(
    http_req: HttpRequest,
    token: GameToken,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let stats = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let game = GameService.load_game(txn, token.as_str()).await?;
            StatsService.stats(txn, &game).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(stats))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)))
        .service(web::resource("/{token}/join").route(web::post().to(join_game)))
        .service(web::resource("/{token}/state").route(web::get().to(get_state)))
        .service(web::resource("/{token}/facts").route(web::post().to(submit_fact)))
        .service(web::resource("/{token}/guesses").route(web::post().to(submit_guess)))
        .service(web::resource("/{token}/story/finish").route(web::post().to(finish_story)))
        .service(web::resource("/{token}/ratings").route(web::post().to(submit_rating)))
        .service(
            web::resource("/{token}/players/{player_id}").route(web::delete().to(kick_player)),
        )
        .service(web::resource("/{token}/start").route(web::post().to(start_game)))
        .service(web::resource("/{token}/end").route(web::post().to(end_game)))
        .service(web::resource("/{token}/current-fact").route(web::post().to(set_current_fact)))
        .service(web::resource("/{token}/scoreboard").route(web::get().to(get_scoreboard)))
        .service(web::resource("/{token}/score-log").route(web::get().to(get_score_log)))
        .service(web::resource("/{token}/stats").route(web::get().to(get_stats)));
}
