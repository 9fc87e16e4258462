//! Per-address aggregation across all six waste types.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    calendar_event::{build_event, CalendarEvent},
    expand::{expand, ExpandError},
    recurrence::parse_schedule_text,
    schedule::StreetSchedule,
    waste_type::WasteType,
};

/// Everything derived from one schedule: the exportable events, the per-type
/// date index backing the preview calendar, and the data-quality issues
/// encountered on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedSchedule {
    pub events: Vec<CalendarEvent>,
    pub index: BTreeMap<WasteType, BTreeSet<NaiveDate>>,
    pub issues: Vec<ScheduleIssue>,
}

impl AggregatedSchedule {
    /// Is `date` a collection day for `waste_type` at this address?
    pub fn has_pickup(&self, waste_type: WasteType, date: NaiveDate) -> bool {
        self.index
            .get(&waste_type)
            .is_some_and(|dates| dates.contains(&date))
    }
}

/// An expansion error pinned to the waste type it occurred in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleIssue {
    pub waste_type: WasteType,
    pub error: ExpandError,
}

impl fmt::Display for ScheduleIssue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.waste_type.label(), self.error)
    }
}

/// Run parser, expander and event factory once per waste type.
///
/// Waste types are independent: unparseable text or invalid date tokens in
/// one never affect the other five. Most addresses legitimately have empty
/// text for several waste types.
pub fn aggregate(schedule: &StreetSchedule) -> AggregatedSchedule {
    let mut aggregated = AggregatedSchedule::default();
    for waste_type in WasteType::ALL {
        let text = schedule.waste_text(waste_type);
        let Some(spec) = parse_schedule_text(text) else {
            if !text.trim().is_empty() {
                debug!(
                    waste_type = waste_type.label(),
                    text, "schedule text matched no grammar"
                );
            }
            continue;
        };
        let expansion = expand(&spec, schedule.year);
        for error in &expansion.errors {
            warn!(waste_type = waste_type.label(), %error, "skipping date token");
            aggregated.issues.push(ScheduleIssue {
                waste_type,
                error: error.clone(),
            });
        }
        if let Some(event) = build_event(schedule, waste_type, &spec, &expansion) {
            aggregated.events.push(event);
        }
        if !expansion.dates.is_empty() {
            aggregated.index.insert(waste_type, expansion.dates);
        }
    }
    aggregated
}
