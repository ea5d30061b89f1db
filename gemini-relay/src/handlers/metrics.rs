use crate::startup::AppState;
use axum::extract::State;

pub async fn metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}
