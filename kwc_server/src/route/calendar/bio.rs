use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use kwc_core::waste_type::{WasteType, WasteTypeBitmask};

use crate::{
    route::calendar::{handle, ScheduleQueryParams},
    AppState,
};

pub async fn handler(
    State(state): State<AppState>,
    Query(schedule_query_params): Query<ScheduleQueryParams>,
) -> Result<Response, (StatusCode, String)> {
    handle(
        &state,
        &schedule_query_params,
        WasteTypeBitmask::InvertedBio,
        Some(WasteType::Bio.label()),
    )
    .await
}
