use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{ApiResponse, AppState, RemoveOutcome, ResponseMeta};
use crate::middleware::RequestId;

pub(super) async fn delete_news(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(title): Path<String>,
) -> Json<ApiResponse<RemoveOutcome>> {
    state.service.poll().await;
    let removed = state.service.delete_news(&title).await;

    Json(ApiResponse {
        data: RemoveOutcome { removed },
        meta: ResponseMeta::new(req_id.0),
    })
}
