//! Single binary web server for the match console: JSON API over the in-memory game store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, CLOCK_PERIODS, CLOCK_PERIOD_SECS.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use match_console_web::{
    advance_game_period, close_possession, configure_clock, open_possession, pause_clock,
    player_report, read_clock, record_opponent_goal, record_shot, record_substitution,
    set_roster_entry, start_clock, stop_clock, ClockSettings, Game, GameId, MatchError,
    MatchStore, PeriodMark, PlayerId, PossessionKind, PossessionResult, ServerConfig,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

type AppState = Data<MatchStore>;
type AppConfig = Data<ServerConfig>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateGameBody {
    #[serde(default)]
    club_id: Option<Uuid>,
    #[serde(default)]
    settings: Option<ClockSettings>,
}

#[derive(Deserialize, Default)]
struct AdvanceBody {
    #[serde(default)]
    force: bool,
}

#[derive(Deserialize)]
struct RosterBody {
    player_id: PlayerId,
    is_starting: bool,
    #[serde(default)]
    starting_position: Option<String>,
}

#[derive(Deserialize)]
struct SubstitutionBody {
    player_in: PlayerId,
    player_out: PlayerId,
    /// Both must be given to override the clock's current period and remaining time.
    #[serde(default)]
    period: Option<PeriodMark>,
    #[serde(default)]
    time_remaining_secs: Option<u32>,
}

#[derive(Deserialize)]
struct ShotBody {
    player_id: PlayerId,
    made: bool,
}

#[derive(Deserialize)]
struct OpenPossessionBody {
    #[serde(default)]
    kind: PossessionKind,
    #[serde(default)]
    player_id: Option<PlayerId>,
}

#[derive(Deserialize)]
struct ClosePossessionBody {
    result: PossessionResult,
}

/// Path segment: game id (e.g. /api/games/{id})
#[derive(Deserialize)]
struct GamePath {
    id: GameId,
}

/// Path segments: game id and player id (e.g. /api/games/{id}/players/{player_id}/report)
#[derive(Deserialize)]
struct GamePlayerPath {
    id: GameId,
    player_id: PlayerId,
}

/// Map a domain error to a JSON error response.
fn error_response(e: MatchError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        MatchError::NotFound(_) => HttpResponse::NotFound().json(body),
        MatchError::Conflict(_) => HttpResponse::Conflict().json(body),
        MatchError::LockPoisoned => HttpResponse::InternalServerError().json(body),
        MatchError::InvalidTransition(_)
        | MatchError::InvalidConfig(_)
        | MatchError::InvalidSubstitution
        | MatchError::PossessionAlreadyOpen
        | MatchError::NoOpenPossession => HttpResponse::BadRequest().json(body),
    }
}

fn respond<T: Serialize>(result: Result<T, MatchError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "match-console-web",
    })
}

/// Schedule a new game (stopped clock, period 1). Settings default to the server's clock config.
#[post("/api/games")]
async fn api_create_game(
    state: AppState,
    config: AppConfig,
    body: Option<Json<CreateGameBody>>,
) -> HttpResponse {
    let club_id = body
        .as_ref()
        .and_then(|b| b.club_id)
        .unwrap_or_else(Uuid::new_v4);
    let settings = body
        .as_ref()
        .and_then(|b| b.settings)
        .unwrap_or(config.default_clock);
    let game = match Game::new(club_id, settings) {
        Ok(g) => g,
        Err(e) => return error_response(e),
    };
    let id = game.id;
    respond(state.insert(game).and_then(|_| state.get(id)))
}

#[get("/api/games/{id}")]
async fn api_get_game(state: AppState, path: Path<GamePath>) -> HttpResponse {
    respond(state.get(path.id))
}

/// Clock read for polling clients: derived on every request, never cached.
#[get("/api/games/{id}/clock")]
async fn api_read_clock(state: AppState, path: Path<GamePath>) -> HttpResponse {
    respond(state.read(path.id, |g| read_clock(g, Utc::now())))
}

#[post("/api/games/{id}/clock/start")]
async fn api_start_clock(state: AppState, path: Path<GamePath>) -> HttpResponse {
    respond(state.update(path.id, |g| start_clock(g, Utc::now())))
}

#[post("/api/games/{id}/clock/pause")]
async fn api_pause_clock(state: AppState, path: Path<GamePath>) -> HttpResponse {
    respond(state.update(path.id, |g| pause_clock(g, Utc::now())))
}

#[post("/api/games/{id}/clock/stop")]
async fn api_stop_clock(state: AppState, path: Path<GamePath>) -> HttpResponse {
    respond(state.update(path.id, |g| Ok(stop_clock(g, Utc::now()))))
}

/// Advance to the next period; `force` allows it before the period clock reaches zero.
#[post("/api/games/{id}/clock/advance")]
async fn api_advance_period(
    state: AppState,
    path: Path<GamePath>,
    body: Option<Json<AdvanceBody>>,
) -> HttpResponse {
    let force = body.map(|b| b.into_inner()).unwrap_or_default().force;
    respond(state.update(path.id, |g| {
        let now = Utc::now();
        let outcome = advance_game_period(g, now, force)?;
        Ok(serde_json::json!({
            "outcome": outcome,
            "clock": read_clock(g, now),
            "completed": g.completed,
        }))
    }))
}

#[put("/api/games/{id}/clock/settings")]
async fn api_configure_clock(
    state: AppState,
    path: Path<GamePath>,
    body: Json<ClockSettings>,
) -> HttpResponse {
    let settings = body.into_inner();
    respond(state.update(path.id, |g| configure_clock(g, settings, Utc::now())))
}

#[put("/api/games/{id}/roster")]
async fn api_set_roster_entry(
    state: AppState,
    path: Path<GamePath>,
    body: Json<RosterBody>,
) -> HttpResponse {
    respond(state.update(path.id, |g| {
        Ok(set_roster_entry(
            g,
            body.player_id,
            body.is_starting,
            body.starting_position.clone(),
        ))
    }))
}

/// Starting status of one player (players without an entry start on the bench).
#[get("/api/games/{id}/roster/{player_id}")]
async fn api_get_roster_entry(state: AppState, path: Path<GamePlayerPath>) -> HttpResponse {
    respond(state.read(path.id, |g| {
        serde_json::json!({
            "player_id": path.player_id,
            "is_starting": g.roster.is_starting(path.player_id),
            "entry": g.roster.entry(path.player_id),
        })
    }))
}

#[post("/api/games/{id}/substitutions")]
async fn api_record_substitution(
    state: AppState,
    path: Path<GamePath>,
    body: Json<SubstitutionBody>,
) -> HttpResponse {
    let at = body.period.zip(body.time_remaining_secs);
    respond(state.update(path.id, |g| {
        record_substitution(g, body.player_in, body.player_out, at, Utc::now())
    }))
}

/// Substitutions involving one player, in chronological order.
#[get("/api/games/{id}/players/{player_id}/substitutions")]
async fn api_player_substitutions(state: AppState, path: Path<GamePlayerPath>) -> HttpResponse {
    respond(state.read(path.id, |g| g.substitutions.for_player(path.player_id)))
}

#[post("/api/games/{id}/shots")]
async fn api_record_shot(state: AppState, path: Path<GamePath>, body: Json<ShotBody>) -> HttpResponse {
    respond(state.update(path.id, |g| {
        record_shot(g, body.player_id, body.made, Utc::now())
    }))
}

#[post("/api/games/{id}/opponent-goals")]
async fn api_record_opponent_goal(state: AppState, path: Path<GamePath>) -> HttpResponse {
    respond(state.update(path.id, |g| record_opponent_goal(g, Utc::now())))
}

#[post("/api/games/{id}/possessions/open")]
async fn api_open_possession(
    state: AppState,
    path: Path<GamePath>,
    body: Json<OpenPossessionBody>,
) -> HttpResponse {
    respond(state.update(path.id, |g| {
        open_possession(g, body.kind, body.player_id, Utc::now())
    }))
}

#[post("/api/games/{id}/possessions/close")]
async fn api_close_possession(
    state: AppState,
    path: Path<GamePath>,
    body: Json<ClosePossessionBody>,
) -> HttpResponse {
    respond(state.update(path.id, |g| close_possession(g, body.result, Utc::now())))
}

/// Play time, shooting decline, and fatigue level for one player.
#[get("/api/games/{id}/players/{player_id}/report")]
async fn api_player_report(state: AppState, path: Path<GamePlayerPath>) -> HttpResponse {
    respond(state.read(path.id, |g| player_report(g, path.player_id, Utc::now())))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!(
        "Starting server at http://{}:{} (default clock {} x {}s)",
        bind.0,
        bind.1,
        config.default_clock.number_of_periods,
        config.default_clock.period_secs
    );

    let state = Data::new(MatchStore::new());
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_create_game)
            .service(api_get_game)
            .service(api_read_clock)
            .service(api_start_clock)
            .service(api_pause_clock)
            .service(api_stop_clock)
            .service(api_advance_period)
            .service(api_configure_clock)
            .service(api_set_roster_entry)
            .service(api_get_roster_entry)
            .service(api_record_substitution)
            .service(api_player_substitutions)
            .service(api_record_shot)
            .service(api_record_opponent_goal)
            .service(api_open_possession)
            .service(api_close_possession)
            .service(api_player_report)
    })
    .bind(bind)?
    .run()
    .await
}
