pub mod barrel;
pub mod bio;
pub mod glass;
pub mod mixed;
pub mod paper;
pub mod plastic;

use axum::{
    extract::{Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        StatusCode,
    },
    response::{IntoResponse, Response},
};
use kwc_core::{
    aggregate, calendar_file, street_client,
    schedule::StreetSchedule,
    waste_type::WasteTypeBitmask,
};
use serde::Deserialize;

use crate::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct QueryParams {
    year: i32,
    street: u32,
    schedule: String,
    #[serde(default)]
    exclude_mixed: bool,
    #[serde(default)]
    exclude_paper: bool,
    #[serde(default)]
    exclude_plastic: bool,
    #[serde(default)]
    exclude_glass: bool,
    #[serde(default)]
    exclude_bio: bool,
    #[serde(default)]
    exclude_barrel: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleQueryParams {
    year: i32,
    street: u32,
    schedule: String,
}

impl From<&QueryParams> for ScheduleQueryParams {
    fn from(value: &QueryParams) -> Self {
        Self {
            year: value.year,
            street: value.street,
            schedule: value.schedule.clone(),
        }
    }
}

impl From<&QueryParams> for WasteTypeBitmask {
    fn from(value: &QueryParams) -> Self {
        let mut waste_type_bitmask = WasteTypeBitmask::none();
        if value.exclude_mixed {
            waste_type_bitmask |= WasteTypeBitmask::Mixed;
        }
        if value.exclude_paper {
            waste_type_bitmask |= WasteTypeBitmask::Paper;
        }
        if value.exclude_plastic {
            waste_type_bitmask |= WasteTypeBitmask::Plastic;
        }
        if value.exclude_glass {
            waste_type_bitmask |= WasteTypeBitmask::Glass;
        }
        if value.exclude_bio {
            waste_type_bitmask |= WasteTypeBitmask::Bio;
        }
        if value.exclude_barrel {
            waste_type_bitmask |= WasteTypeBitmask::Barrel;
        }
        waste_type_bitmask
    }
}

pub async fn handle(
    state: &AppState,
    schedule_query_params: &ScheduleQueryParams,
    excluded_waste_types: WasteTypeBitmask,
    label: Option<&str>,
) -> Result<Response, (StatusCode, String)> {
    let schedule = load_schedule(state, schedule_query_params).await?;
    let mut aggregated = aggregate::aggregate(&schedule);
    aggregated
        .events
        .retain(|event| !excluded_waste_types.contains(WasteTypeBitmask::from(event.waste_type)));
    let payload = calendar_file::encode_calendar(&aggregated.events, label)
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    let file_name = calendar_file::calendar_file_name(
        schedule_query_params.year,
        schedule_query_params.street,
        &schedule_query_params.schedule,
    );
    let response = (
        [
            (CONTENT_TYPE, String::from("text/calendar; charset=UTF-16BE")),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        payload,
    )
        .into_response();
    Ok(response)
}

/// Handle calendar requests.
///
/// The `year`, `street` file index and `schedule` id must be given in the
/// query string.
pub async fn handler(
    State(state): State<AppState>,
    Query(query_params): Query<QueryParams>,
) -> Result<Response, (StatusCode, String)> {
    let response = handle(
        &state,
        &ScheduleQueryParams::from(&query_params),
        WasteTypeBitmask::from(&query_params),
        None,
    )
    .await?;
    Ok(response)
}

async fn load_schedule(
    state: &AppState,
    schedule_query_params: &ScheduleQueryParams,
) -> Result<StreetSchedule, (StatusCode, String)> {
    let path = state
        .data_dir
        .join(schedule_query_params.year.to_string())
        .join(format!("street-{}.json", schedule_query_params.street));
    let bytes = tokio::fs::read(&path).await.map_err(|err| {
        (
            StatusCode::NOT_FOUND,
            format!("no street data at {}: {err}", path.display()),
        )
    })?;
    let rows: Vec<Vec<String>> = serde_json::from_slice(&bytes)
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    let schedules = street_client::schedules_from_rows(schedule_query_params.year, &rows)
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    schedules
        .into_iter()
        .find(|schedule| schedule.id == schedule_query_params.schedule)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!(
                    "no schedule {} in street file {}",
                    schedule_query_params.schedule, schedule_query_params.street
                ),
            )
        })
}
