//! This client fetches the published street data files.
//!
//! The host publishes one `street-index.json` per year (street name to file
//! index) and one `street-<index>.json` per street file, each an array of
//! positional rows.

use std::collections::HashMap;

use anyhow::Result;

use crate::schedule::{RowError, StreetSchedule};

/// Get the street-name-to-file-index map for one year.
pub async fn fetch_street_index(base_url: &str, year: i32) -> Result<HashMap<String, u32>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{base_url}/api/{year}/street-index.json"))
        .send()
        .await?
        .error_for_status()?;
    Ok(response.json().await?)
}

/// Get all schedules of one street file for one year.
pub async fn fetch_street_schedules(
    base_url: &str,
    year: i32,
    file_index: u32,
) -> Result<Vec<StreetSchedule>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{base_url}/api/{year}/street-{file_index}.json"))
        .send()
        .await?
        .error_for_status()?;
    let rows: Vec<Vec<String>> = response.json().await?;
    Ok(schedules_from_rows(year, &rows)?)
}

/// Convert the positional rows of one street file.
///
/// The row position within the file is the schedule id.
pub fn schedules_from_rows(
    year: i32,
    rows: &[Vec<String>],
) -> Result<Vec<StreetSchedule>, RowError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| StreetSchedule::from_row(index.to_string(), year, row))
        .collect()
}
