//! Cron job registration endpoints.
//!
//! Thin transport over [`uhrwerk_jobs::JobRuntime`]: parses the wire
//! format, maps runtime errors to protocol-level failures, and never owns
//! scheduling state itself.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use uhrwerk_jobs::{JobError, Payload, ScheduledJob};

use crate::state::AppState;

/// Registration request: which job, when, and with what data.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CronRequest {
    pub id: String,
    /// Standard 5-field cron expression (a 6-field form with seconds is
    /// also accepted).
    pub expression: String,
    /// Job input, defaults to the empty object.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub payload: Payload,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CronResponse {
    pub status: &'static str,
    pub id: String,
}

/// Register (or re-register) a cron job.
///
/// Replaces any schedule already installed under the same id. Returns 400
/// for an unknown job id and for a rejected cron expression; in the latter
/// case the previous schedule is already removed, so the job ends up
/// unscheduled until re-registered with a valid expression.
#[utoipa::path(
    post,
    path = "/internal/cron",
    tag = "Crons",
    request_body = CronRequest,
    responses(
        (status = 200, description = "Cron registered", body = CronResponse),
        (status = 400, description = "Unknown job id or rejected expression", body = String)
    )
)]
pub(crate) async fn register_cron(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CronRequest>,
) -> Result<Json<CronResponse>, (StatusCode, String)> {
    state
        .runtime
        .schedule_job(&req.id, &req.expression, req.payload)
        .map_err(|e| {
            warn!(job_id = %req.id, error = %e, "cron registration rejected");
            match e {
                JobError::UnknownJob(_) | JobError::ScheduleInstall { .. } => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            }
        })?;

    Ok(Json(CronResponse {
        status: "cron registered",
        id: req.id,
    }))
}

/// List currently scheduled jobs with their next fire time.
#[utoipa::path(
    get,
    path = "/internal/cron",
    tag = "Crons",
    responses(
        (status = 200, description = "Scheduled jobs sorted by id", body = Object)
    )
)]
pub(crate) async fn list_crons(State(state): State<Arc<AppState>>) -> Json<Vec<ScheduledJob>> {
    Json(state.scheduler.jobs())
}

/// Fire a registered job immediately, outside its schedule.
///
/// Dispatch is asynchronous: the handler runs on a blocking task and this
/// returns as soon as the dispatch is queued. The job does not need to be
/// scheduled, only registered.
#[utoipa::path(
    post,
    path = "/internal/cron/{id}/run",
    tag = "Crons",
    params(
        ("id" = String, Path, description = "Job identifier")
    ),
    responses(
        (status = 202, description = "Dispatch queued", body = CronResponse),
        (status = 404, description = "Unknown job id", body = String)
    )
)]
pub(crate) async fn run_cron(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<CronResponse>), (StatusCode, String)> {
    if !state.runtime.registry().contains(&id) {
        return Err((StatusCode::NOT_FOUND, format!("unknown job id: {}", id)));
    }

    let dispatcher = state.runtime.dispatcher().clone();
    let job_id = id.clone();
    tokio::task::spawn_blocking(move || dispatcher.dispatch(&job_id));

    Ok((
        StatusCode::ACCEPTED,
        Json(CronResponse {
            status: "dispatch queued",
            id,
        }),
    ))
}

/// Unregister a cron job: remove its schedule and stored payload.
#[utoipa::path(
    delete,
    path = "/internal/cron/{id}",
    tag = "Crons",
    params(
        ("id" = String, Path, description = "Job identifier")
    ),
    responses(
        (status = 204, description = "Job unscheduled (idempotent)")
    )
)]
pub(crate) async fn remove_cron(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    state.runtime.remove_job(&id);
    StatusCode::NO_CONTENT
}
