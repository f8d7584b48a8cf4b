use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use supportcrew_core::PolicyDocument;

#[derive(Clone)]
pub struct HealthState {
    policy: Arc<PolicyDocument>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub policy: HealthCheck,
    pub checked_at: String,
}

pub fn router(policy: Arc<PolicyDocument>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { policy })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let policy = policy_check(&state.policy);
    let ready = policy.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "supportcrew-server runtime initialized".to_string(),
        },
        policy,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn policy_check(policy: &PolicyDocument) -> HealthCheck {
    let bytes = policy.text().trim().len();
    if bytes == 0 {
        HealthCheck { status: "degraded", detail: "policy document is empty".to_string() }
    } else {
        HealthCheck { status: "ready", detail: format!("policy document loaded ({bytes} bytes)") }
    }
}
