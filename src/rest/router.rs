use axum::routing::{get, post};
use axum::Router;

use crate::processor::Processor;

use super::{health, webhook};

#[derive(Clone)]
pub struct AppState {
    pub processor: Processor,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook::handle_event))
        .route("/health", get(health::health))
        .with_state(state)
}
