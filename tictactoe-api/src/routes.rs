//! API endpoints and router.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use tictactoe_core::{notation, GameState};

use crate::models::{
    ErrorModel, ExportModel, GameStateModel, HealthModel, HistoryModel, ImportRequest,
    MoveRequest,
};

// =============================================================================
// Session State
// =============================================================================

/// Shared application state: the one game this server hosts.
#[derive(Default)]
pub struct AppStateInner {
    session: Mutex<GameState>,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    /// Lock the session, ignoring poisoning.
    fn session(&self) -> MutexGuard<'_, GameState> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

type ApiError = (StatusCode, Json<ErrorModel>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn bad_request(detail: impl ToString) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorModel {
            detail: detail.to_string(),
        }),
    )
}

// =============================================================================
// API Endpoints
// =============================================================================

async fn get_game(State(state): State<AppState>) -> Json<GameStateModel> {
    let session = state.session();
    Json(GameStateModel::from_game(&session))
}

async fn make_move(
    State(state): State<AppState>,
    req: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResult<GameStateModel> {
    let Json(req) = req.map_err(|rejection| bad_request(rejection.body_text()))?;
    let cell = req.cell().map_err(bad_request)?;

    let mut session = state.session();
    if let Err(err) = session.try_apply_move(cell) {
        debug!(cell, %err, "move rejected");
        return Err(bad_request(err));
    }

    Ok(Json(GameStateModel::from_game(&session)))
}

async fn jump_to(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> ApiResult<GameStateModel> {
    let Path(index) = index.map_err(|rejection| bad_request(rejection.body_text()))?;
    let mut session = state.session();
    if let Err(err) = session.try_jump_to(index) {
        debug!(index, %err, "jump rejected");
        return Err(bad_request(err));
    }

    Ok(Json(GameStateModel::from_game(&session)))
}

async fn toggle_sort(State(state): State<AppState>) -> Json<GameStateModel> {
    let mut session = state.session();
    session.toggle_sort_order();
    Json(GameStateModel::from_game(&session))
}

async fn reset_game(State(state): State<AppState>) -> Json<GameStateModel> {
    let mut session = state.session();
    session.reset();
    info!("game reset");
    Json(GameStateModel::from_game(&session))
}

async fn get_history(State(state): State<AppState>) -> Json<HistoryModel> {
    let session = state.session();

    Json(HistoryModel {
        moves: session.move_list(),
        current_index: session.current_index(),
        total_moves: session.history_len() - 1,
        sort_order: session.sort_order(),
    })
}

async fn export_game(State(state): State<AppState>) -> Json<ExportModel> {
    let session = state.session();
    Json(ExportModel {
        notation: notation::export(&session),
    })
}

async fn import_game(
    State(state): State<AppState>,
    req: Result<Json<ImportRequest>, JsonRejection>,
) -> ApiResult<GameStateModel> {
    let Json(req) = req.map_err(|rejection| bad_request(rejection.body_text()))?;
    // Replay outside the lock; the session is only replaced on success.
    let mut game = notation::import(&req.notation).map_err(|err| {
        debug!(%err, "import rejected");
        bad_request(err)
    })?;

    let mut session = state.session();
    if game.sort_order() != session.sort_order() {
        game.toggle_sort_order();
    }
    *session = game;
    info!(moves = session.history_len() - 1, "game imported");

    Ok(Json(GameStateModel::from_game(&session)))
}

async fn health() -> Json<HealthModel> {
    Json(HealthModel {
        status: "ok".to_string(),
    })
}

/// Build the router over the given state.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/game", get(get_game))
        .route("/move", post(make_move))
        .route("/jump/{index}", post(jump_to))
        .route("/sort/toggle", post(toggle_sort))
        .route("/reset", post(reset_game))
        .route("/history", get(get_history))
        .route("/export", get(export_game))
        .route("/import", post(import_game))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
