use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::processor::{Event, Outcome};
use crate::rest::AppState;

#[derive(Serialize)]
struct OutcomeBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    #[serde(rename = "overrideId", skip_serializing_if = "Option::is_none")]
    override_id: Option<String>,
}

impl OutcomeBody {
    fn status(status: &'static str) -> Self {
        Self {
            status,
            reason: None,
            override_id: None,
        }
    }

    fn with_override(status: &'static str, override_id: String) -> Self {
        Self {
            status,
            reason: None,
            override_id: Some(override_id),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
}

pub async fn handle_event(
    State(state): State<AppState>,
    payload: Result<Json<Event>, JsonRejection>,
) -> Response {
    let Json(event) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "Invalid payload",
                    detail: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    match state.processor.process(&event).await {
        Outcome::Ignored => (
            StatusCode::OK,
            Json(OutcomeBody {
                status: "ignored",
                reason: Some("no matching rule"),
                override_id: None,
            }),
        )
            .into_response(),
        Outcome::AlreadyActive { override_id } => (
            StatusCode::OK,
            Json(OutcomeBody::with_override("already_active", override_id)),
        )
            .into_response(),
        Outcome::OverrideCreated { override_id } => (
            StatusCode::CREATED,
            Json(OutcomeBody::with_override("override_created", override_id)),
        )
            .into_response(),
        Outcome::NoActiveOverride => (
            StatusCode::OK,
            Json(OutcomeBody::status("no_active_override")),
        )
            .into_response(),
        Outcome::OverrideRemoved { override_id } => (
            StatusCode::OK,
            Json(OutcomeBody::with_override("override_removed", override_id)),
        )
            .into_response(),
        Outcome::GateUnreachable { detail } => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorBody {
                error: "AgentGate unreachable",
                detail,
            }),
        )
            .into_response(),
    }
}
