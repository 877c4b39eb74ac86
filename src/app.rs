use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/shots", post(handlers::add_shot))
        .route("/api/shots/undo", post(handlers::undo_shot))
        .route("/api/points/:side", post(handlers::credit_point))
        .route("/api/points/:side/revert", post(handlers::revert_point))
        .route("/api/match/finish", post(handlers::finish_match))
        .route("/api/match/reset", post(handlers::reset_match))
        .route("/api/matches", get(handlers::list_matches))
        .route("/api/matches/:id", delete(handlers::delete_match))
        .route("/api/team-names", put(handlers::set_team_names))
        .route("/api/serve", put(handlers::set_serve))
        .route("/api/serve/flip", post(handlers::flip_serve))
        .route("/api/serve/toss", post(handlers::coin_toss))
        .route("/api/training/shots", post(handlers::add_training_shot))
        .route("/api/training/shots/undo", post(handlers::undo_training_shot))
        .route("/api/training/save", post(handlers::save_training))
        .route("/api/training/clear", post(handlers::clear_training))
        .route("/api/training/days", get(handlers::list_training_days))
        .route("/api/training/sessions/:id", delete(handlers::delete_training_session))
        .with_state(state)
}
