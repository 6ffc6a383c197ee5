use axum::{extract::State, Extension, Json};
use serde::Serialize;

use covdash_engine::{NewsItem, UpdateEntry};

use super::{ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// The flat value set a templating front end renders directly: titles and
/// locations from config, the four covid figures, and the two display lists.
#[derive(Debug, Serialize)]
pub(super) struct DashboardPayload {
    pub title: String,
    pub location: String,
    pub local_7day_infections: i64,
    pub nation_location: String,
    pub national_7day_infections: i64,
    pub hospital_cases: Option<i64>,
    pub deaths_total: Option<i64>,
    pub news: Vec<NewsItem>,
    pub updates: Vec<UpdateEntry>,
}

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<DashboardPayload>> {
    // Every request drives the cooperative scheduler forward first.
    state.service.poll().await;
    let data = state.service.dashboard().await;

    Json(ApiResponse {
        data: DashboardPayload {
            title: state.config.dashboard_title.clone(),
            location: state.config.city.clone(),
            local_7day_infections: data.covid.local_seven_day_cases,
            nation_location: state.config.nation.clone(),
            national_7day_infections: data.covid.national_seven_day_cases,
            hospital_cases: data.covid.hospital_cases,
            deaths_total: data.covid.cumulative_deaths,
            news: data.news,
            updates: data.updates,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
