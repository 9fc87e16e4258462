//! Serialization of calendar events into a downloadable iCalendar file.

use chrono::Local;
use ical::{
    generator::{Emitter, IcalCalendarBuilder, IcalEvent, IcalEventBuilder, Property},
    ical_param, ical_property,
    parser::ical::component::IcalAlarm,
};
use regex::Regex;
use thiserror::Error;

use crate::{
    calendar_event::{
        CalendarEvent, EventDates, CATEGORY, EVENT_URL, ORGANIZER_NAME, ORGANIZER_URI,
        REMINDER_TRIGGER, STATUS, TRANSPARENCY, VISIBILITY,
    },
    waste_type::WasteType,
};

static PROD_ID: [&str; 2] = ["Odbior odpadów Kraków", "zayats.pl"];
static TIMEZONE: &str = "Europe/Warsaw";
static FORMAT: &str = "%Y%m%d";

#[derive(Debug, Error)]
pub enum EncodeError {
    /// An event reached the encoder without a single date to write.
    #[error("no collection dates to serialize for {waste_type:?}")]
    EmptyEvent { waste_type: WasteType },
}

/// Serialize the events of one address into a calendar file payload.
///
/// The payload is UTF-16 big-endian with a byte-order mark, so consumers
/// never have to guess the charset. `label` narrows the product id for
/// single-waste-type calendars.
pub fn encode_calendar(
    events: &[CalendarEvent],
    label: Option<&str>,
) -> Result<Vec<u8>, EncodeError> {
    let text = calendar_text(events, label)?;
    Ok(to_utf16be(&text))
}

/// Suggested download name for one address's calendar file.
pub fn calendar_file_name(year: i32, street_index: u32, schedule_id: &str) -> String {
    format!("odbior-krakow-{year}-{street_index}-{schedule_id}.ics")
}

fn calendar_text(events: &[CalendarEvent], label: Option<&str>) -> Result<String, EncodeError> {
    let changed = Local::now().format("%Y%m%dT%H%M%S").to_string();
    let mut calendar = IcalCalendarBuilder::version("2.0")
        .gregorian()
        .prodid(prod_id(label))
        .build();
    for event in events {
        calendar.events.push(build_ical_event(event, &changed)?);
    }
    Ok(repair_property_lines(&calendar.generate()))
}

fn build_ical_event(event: &CalendarEvent, changed: &str) -> Result<IcalEvent, EncodeError> {
    let builder = IcalEventBuilder::tzid(TIMEZONE)
        .uid(uid(&event.location, &event.description))
        .changed(changed.to_string());
    let builder = match &event.dates {
        EventDates::Explicit(dates) => {
            let first = dates.iter().next().ok_or(EncodeError::EmptyEvent {
                waste_type: event.waste_type,
            })?;
            builder
                .one_day(first.format(FORMAT).to_string())
                .set(ical_property!(
                    "RDATE",
                    dates
                        .iter()
                        .map(|date| date.format(FORMAT).to_string())
                        .collect::<Vec<String>>()
                        .join(","),
                    ical_param!("VALUE", "DATE")
                ))
        }
        EventDates::Recurring {
            rule,
            first_occurrence,
        } => builder
            .one_day(first_occurrence.format(FORMAT).to_string())
            .set(ical_property!("RRULE", rule.as_str())),
    };
    let mut ical_event = builder
        .set(ical_property!("SUMMARY", event.title.as_str()))
        .set(ical_property!("DESCRIPTION", event.description.as_str()))
        .set(ical_property!("LOCATION", event.location.as_str()))
        .set(ical_property!("URL", EVENT_URL))
        .set(ical_property!("CATEGORIES", CATEGORY))
        .set(ical_property!(
            "ORGANIZER",
            ORGANIZER_URI,
            ical_param!("CN", ORGANIZER_NAME)
        ))
        .set(ical_property!("STATUS", STATUS))
        .set(ical_property!("CLASS", VISIBILITY))
        .set(ical_property!("TRANSP", TRANSPARENCY))
        .build();
    ical_event.alarms.push(reminder(&event.description));
    Ok(ical_event)
}

fn reminder(description: &str) -> IcalAlarm {
    let mut alarm = IcalAlarm::new();
    alarm.properties.push(ical_property!("ACTION", "DISPLAY"));
    alarm
        .properties
        .push(ical_property!("TRIGGER", REMINDER_TRIGGER));
    alarm
        .properties
        .push(ical_property!("DESCRIPTION", description));
    alarm
}

/// When enumerated-date events and rule events share one file, the emitted
/// text can carry a recurrence-rule prefix glued onto an explicit date list.
/// Split such lines so each property keeps its own key; importers reject the
/// combined form.
fn repair_property_lines(ics: &str) -> String {
    ics.replace("RRULE:RDATE:", "RDATE:")
}

/// UTF-16 big-endian with a leading byte-order mark.
fn to_utf16be(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&[0xFE, 0xFF]);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

fn prod_id(label: Option<&str>) -> String {
    match label {
        Some(label) => format!("-//{label}//{}//{}", PROD_ID[0], PROD_ID[1]),
        None => format!("-//{}//{}", PROD_ID[0], PROD_ID[1]),
    }
}

/// Get a unique id for a specific waste collection type at a specific
/// location.
///
/// Changing this function is a breaking change!
fn uid(location: &str, label: &str) -> String {
    let whitespace_regex = Regex::new(r"\s+").unwrap();
    let whitespace_rep = "-";
    let location = whitespace_regex.replace_all(location, whitespace_rep);
    let label = whitespace_regex.replace_all(label, whitespace_rep);
    format!("odbior-odpadow_{location}_{label}@zayats.pl")
}
