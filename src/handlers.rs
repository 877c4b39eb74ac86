use crate::errors::AppError;
use crate::models::{
    AppData, MatchReview, ServeRequest, ShotEvent, Side, TeamNames, TrainingDayReview,
    TrainingSaveRequest,
};
use crate::state::AppState;
use crate::stats::{review_match, review_training_days};
use crate::tracker::Tracker;
use crate::ui::render_index;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let tracker = state.tracker.lock().await;
    Html(render_index(tracker.data()))
}

pub async fn get_state(State(state): State<AppState>) -> Json<AppData> {
    let tracker = state.tracker.lock().await;
    snapshot(&tracker)
}

pub async fn add_shot(
    State(state): State<AppState>,
    Json(event): Json<ShotEvent>,
) -> Json<AppData> {
    apply(&state, |tracker| tracker.add_shot_event(event)).await
}

pub async fn undo_shot(State(state): State<AppState>) -> Json<AppData> {
    apply(&state, Tracker::undo_last_shot_event).await
}

pub async fn credit_point(State(state): State<AppState>, Path(side): Path<Side>) -> Json<AppData> {
    apply(&state, |tracker| {
        tracker.credit_point(side);
    })
    .await
}

pub async fn revert_point(State(state): State<AppState>, Path(side): Path<Side>) -> Json<AppData> {
    apply(&state, |tracker| tracker.revert_point(side)).await
}

pub async fn finish_match(State(state): State<AppState>) -> Json<AppData> {
    apply(&state, |tracker| {
        tracker.finish_match();
    })
    .await
}

pub async fn reset_match(State(state): State<AppState>) -> Json<AppData> {
    apply(&state, Tracker::reset_match).await
}

pub async fn list_matches(State(state): State<AppState>) -> Json<Vec<MatchReview>> {
    let tracker = state.tracker.lock().await;
    let data = tracker.data();
    Json(
        data.matches
            .entries()
            .iter()
            .map(|entry| review_match(entry, &data.team_names))
            .collect(),
    )
}

pub async fn delete_match(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<AppData> {
    apply(&state, |tracker| {
        tracker.delete_match(id);
    })
    .await
}

/// Names are free text and are stored exactly as sent.
pub async fn set_team_names(
    State(state): State<AppState>,
    Json(names): Json<TeamNames>,
) -> Json<AppData> {
    apply(&state, |tracker| tracker.set_team_names(names)).await
}

pub async fn flip_serve(State(state): State<AppState>) -> Json<AppData> {
    apply(&state, Tracker::flip_serve).await
}

pub async fn set_serve(
    State(state): State<AppState>,
    Json(payload): Json<ServeRequest>,
) -> Json<AppData> {
    apply(&state, |tracker| tracker.set_serve(payload.side)).await
}

/// Picks the first server at random. The tracker only ever sees the result.
pub async fn coin_toss(State(state): State<AppState>) -> Json<AppData> {
    let side = if rand::random::<bool>() { Side::Us } else { Side::Them };
    info!(%side, "coin toss");
    apply(&state, |tracker| tracker.set_serve(side)).await
}

pub async fn add_training_shot(
    State(state): State<AppState>,
    Json(event): Json<ShotEvent>,
) -> Json<AppData> {
    apply(&state, |tracker| tracker.add_training_shot_event(event)).await
}

pub async fn undo_training_shot(State(state): State<AppState>) -> Json<AppData> {
    apply(&state, Tracker::undo_last_training_shot_event).await
}

/// An empty body saves without a manual duration. Any other body must be a
/// valid request.
pub async fn save_training(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AppData>, AppError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        TrainingSaveRequest::default()
    } else {
        serde_json::from_slice::<TrainingSaveRequest>(&body)
            .map_err(|err| AppError::bad_request(format!("invalid request body: {err}")))?
    };
    let mut tracker = state.tracker.lock().await;
    if tracker.save_training_session(request.duration_minutes).is_none() {
        return Err(AppError::bad_request("no training shots recorded"));
    }
    Ok(snapshot(&tracker))
}

pub async fn clear_training(State(state): State<AppState>) -> Json<AppData> {
    apply(&state, Tracker::clear_training_session).await
}

pub async fn list_training_days(State(state): State<AppState>) -> Json<Vec<TrainingDayReview>> {
    let tracker = state.tracker.lock().await;
    Json(review_training_days(&tracker.data().training_sessions, Utc::now()))
}

pub async fn delete_training_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<AppData> {
    apply(&state, |tracker| {
        tracker.delete_training_session(id);
    })
    .await
}

async fn apply<F>(state: &AppState, op: F) -> Json<AppData>
where
    F: FnOnce(&mut Tracker),
{
    let mut tracker = state.tracker.lock().await;
    op(&mut tracker);
    snapshot(&tracker)
}

fn snapshot(tracker: &Tracker) -> Json<AppData> {
    Json(tracker.data().clone())
}
