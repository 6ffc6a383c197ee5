use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use covdash_engine::{ScheduleError, UpdateRequest};

use super::{ApiError, ApiResponse, AppState, RemoveOutcome, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ScheduleBody {
    pub name: String,
    /// Wall-clock target time as `"HH:MM"`.
    pub interval: String,
    #[serde(default)]
    pub repeat: bool,
    #[serde(default)]
    pub covid_data: bool,
    #[serde(default)]
    pub news: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct ScheduleOutcome {
    pub scheduled: bool,
}

pub(super) async fn schedule_update(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ScheduleBody>,
) -> Result<Json<ApiResponse<ScheduleOutcome>>, ApiError> {
    state.service.poll().await;

    let request = UpdateRequest {
        name: body.name,
        interval: body.interval,
        repeat: body.repeat,
        refresh_covid: body.covid_data,
        refresh_news: body.news,
    };

    let scheduled = match state.service.schedule_update(request).await {
        Ok(()) => true,
        // Already logged by the engine; dropped silently rather than
        // surfaced as an end-user error.
        Err(ScheduleError::NothingRequested) => false,
        Err(error @ ScheduleError::InvalidInterval(_)) => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                error.to_string(),
            ));
        }
        Err(error @ ScheduleError::DuplicateName(_)) => {
            return Err(ApiError::new(req_id.0, "conflict", error.to_string()));
        }
    };

    Ok(Json(ApiResponse {
        data: ScheduleOutcome { scheduled },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn cancel_update(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(name): Path<String>,
) -> Json<ApiResponse<RemoveOutcome>> {
    state.service.poll().await;
    let removed = state.service.cancel_update(&name).await;

    Json(ApiResponse {
        data: RemoveOutcome { removed },
        meta: ResponseMeta::new(req_id.0),
    })
}
