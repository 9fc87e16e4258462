//! Calendar event construction for one (schedule, waste type) pair.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};

use crate::{
    expand::Expansion,
    recurrence::RecurrenceSpec,
    schedule::StreetSchedule,
    waste_type::WasteType,
};

/// Prefix of every event title, completed by the waste type label.
pub static TITLE_PREFIX: &str = "Odbior odpadów - ";
/// Category assigned to every collection event.
pub static CATEGORY: &str = "Odbior odpadów";
/// Homepage advertised in every event.
pub static EVENT_URL: &str = "http://zayats.pl";
/// Display name of the collection operator.
pub static ORGANIZER_NAME: &str = "MPO Kraków";
/// Contact address of the collection operator.
pub static ORGANIZER_URI: &str = "mailto:bok@mpo.krakow.pl";
/// Reminder offset before the collection day starts.
pub static REMINDER_TRIGGER: &str = "-PT10M";
/// Collection events are visible to everyone.
pub static VISIBILITY: &str = "PUBLIC";
/// Collections are confirmed appointments.
pub static STATUS: &str = "CONFIRMED";
/// A collection does not block the attendee's time.
pub static TRANSPARENCY: &str = "TRANSPARENT";

/// One exportable/previewable unit for one waste type at one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub waste_type: WasteType,
    pub title: String,
    pub description: String,
    pub location: String,
    pub dates: EventDates,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDates {
    /// An enumerated list of collection days, exported as a date list.
    Explicit(BTreeSet<NaiveDate>),
    /// A weekly rule, exported with its first occurrence as the start.
    Recurring {
        rule: String,
        first_occurrence: NaiveDate,
    },
}

/// Build the event for one waste type, or `None` when the recurrence denotes
/// no dates at all within the schedule year.
///
/// The displayed dates always come from the expansion, never from re-deriving
/// the serialized rule, so preview and export cannot drift apart.
pub fn build_event(
    schedule: &StreetSchedule,
    waste_type: WasteType,
    spec: &RecurrenceSpec,
    expansion: &Expansion,
) -> Option<CalendarEvent> {
    let first_occurrence = expansion.dates.iter().next().copied()?;
    let label = waste_type.label();
    let dates = match recurrence_rule(spec, schedule.year) {
        Some(rule) => EventDates::Recurring {
            rule,
            first_occurrence,
        },
        None => EventDates::Explicit(expansion.dates.clone()),
    };
    Some(CalendarEvent {
        waste_type,
        title: format!("{TITLE_PREFIX}{label}"),
        description: label.to_string(),
        location: format!("{} {}", schedule.street, schedule.house_number),
        dates,
    })
}

/// Serialized recurrence rule, `None` for enumerated date lists.
fn recurrence_rule(spec: &RecurrenceSpec, year: i32) -> Option<String> {
    match spec {
        RecurrenceSpec::ExplicitDates { .. } => None,
        RecurrenceSpec::WeeklyByWeekday {
            weekdays,
            range_end,
            ..
        } => Some(format!(
            "FREQ=WEEKLY;INTERVAL=1;BYDAY={};UNTIL={year}{:02}{:02}",
            byday(weekdays),
            range_end.month,
            range_end.day
        )),
        RecurrenceSpec::IntervalWeeklyFromAnchor {
            weekdays,
            interval_weeks,
            range_end,
            ..
        } => Some(format!(
            "FREQ=WEEKLY;INTERVAL={interval_weeks};BYDAY={};UNTIL={year}{:02}{:02}",
            byday(weekdays),
            range_end.month,
            range_end.day
        )),
    }
}

fn byday(weekdays: &[Weekday]) -> String {
    weekdays
        .iter()
        .map(|weekday| match weekday {
            Weekday::Mon => "MO",
            Weekday::Tue => "TU",
            Weekday::Wed => "WE",
            Weekday::Thu => "TH",
            Weekday::Fri => "FR",
            Weekday::Sat => "SA",
            Weekday::Sun => "SU",
        })
        .collect::<Vec<&str>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use crate::{expand::expand, recurrence::parse_schedule_text};

    use super::*;

    fn test_schedule() -> StreetSchedule {
        StreetSchedule::from_row(
            "0".to_string(),
            2024,
            &[
                "Zabudowa jednorodzinna",
                "Wielicka",
                "44",
                "S6",
                "MPO",
                "03.04,17.04,01.05",
                "poniedziałek,czwartek",
                "",
                "wtorek, piątek co 2 tygodnie od dnia 4 stycznia",
                "",
                "",
            ]
            .map(String::from),
        )
        .unwrap()
    }

    fn event_for(schedule: &StreetSchedule, waste_type: WasteType) -> Option<CalendarEvent> {
        let spec = parse_schedule_text(schedule.waste_text(waste_type))?;
        let expansion = expand(&spec, schedule.year);
        build_event(schedule, waste_type, &spec, &expansion)
    }

    #[test]
    fn test_build_explicit_event() {
        let schedule = test_schedule();
        let event = event_for(&schedule, WasteType::Mixed).unwrap();
        assert_eq!(event.title, "Odbior odpadów - zmieszane");
        assert_eq!(event.description, "zmieszane");
        assert_eq!(event.location, "Wielicka 44");
        let EventDates::Explicit(dates) = event.dates else {
            panic!("expected explicit dates");
        };
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn test_build_weekly_event() {
        let schedule = test_schedule();
        let event = event_for(&schedule, WasteType::Paper).unwrap();
        let EventDates::Recurring {
            rule,
            first_occurrence,
        } = event.dates
        else {
            panic!("expected a recurring event");
        };
        assert_eq!(rule, "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,TH;UNTIL=20241231");
        assert_eq!(
            first_occurrence,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_build_interval_event() {
        let schedule = test_schedule();
        let event = event_for(&schedule, WasteType::Glass).unwrap();
        let EventDates::Recurring {
            rule,
            first_occurrence,
        } = event.dates
        else {
            panic!("expected a recurring event");
        };
        assert_eq!(rule, "FREQ=WEEKLY;INTERVAL=2;BYDAY=TU,FR;UNTIL=20241231");
        assert_eq!(
            first_occurrence,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_build_event_without_dates() {
        let mut schedule = test_schedule();
        schedule
            .waste
            .insert(WasteType::Bio, "30.02".to_string());
        assert_eq!(event_for(&schedule, WasteType::Bio), None);
    }
}
