//! Classification of raw schedule texts into structured recurrences.
//!
//! A text is tried against three grammars in fixed precedence: an enumerated
//! `DD.MM` date list, a list of Polish weekday names, and an every-N-weeks
//! pattern anchored to a first occurrence ("wtorek co 2 tygodnie od dnia
//! 4 stycznia"). Text matching none of them yields no recurrence at all.

use std::collections::BTreeSet;

use chrono::Weekday;
use regex::Regex;

/// A calendar day without a year, kept uninterpreted until expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

/// Structured form of one waste type's schedule text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceSpec {
    /// An enumerated, non-repeating list of days within the schedule year.
    ExplicitDates { dates: BTreeSet<MonthDay> },
    /// Recurs weekly on the given weekdays over the whole schedule year.
    WeeklyByWeekday {
        weekdays: Vec<Weekday>,
        range_start: MonthDay,
        range_end: MonthDay,
    },
    /// Recurs every `interval_weeks` weeks on the given weekdays, phased by
    /// the first occurrence date.
    IntervalWeeklyFromAnchor {
        weekdays: Vec<Weekday>,
        interval_weeks: u32,
        anchor: MonthDay,
        range_end: MonthDay,
    },
}

static WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("poniedziałek", Weekday::Mon),
    ("wtorek", Weekday::Tue),
    ("środa", Weekday::Wed),
    ("czwartek", Weekday::Thu),
    ("piątek", Weekday::Fri),
    ("sobota", Weekday::Sat),
    ("niedziela", Weekday::Sun),
];

static MONTH_NAMES_GENITIVE: [&str; 12] = [
    "stycznia",
    "lutego",
    "marca",
    "kwietnia",
    "maja",
    "czerwca",
    "lipca",
    "sierpnia",
    "września",
    "października",
    "listopada",
    "grudnia",
];

const YEAR_START: MonthDay = MonthDay { month: 1, day: 1 };
const YEAR_END: MonthDay = MonthDay { month: 12, day: 31 };

/// Parse one raw schedule text.
///
/// Returns `None` for text matching no grammar, including the empty text an
/// address has when no separate collection of that waste type exists.
pub fn parse_schedule_text(text: &str) -> Option<RecurrenceSpec> {
    let tokens: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return None;
    }
    if let Some(spec) = parse_explicit_dates(&tokens) {
        return Some(spec);
    }
    if let Some(weekdays) = parse_weekday_list(&tokens) {
        return Some(RecurrenceSpec::WeeklyByWeekday {
            weekdays,
            range_start: YEAR_START,
            range_end: YEAR_END,
        });
    }
    parse_interval_from_anchor(text)
}

/// Every token must look like `DD.MM`. Only the separator's position is
/// checked, not the character itself; day and month are taken verbatim and
/// validated later during expansion.
fn parse_explicit_dates(tokens: &[&str]) -> Option<RecurrenceSpec> {
    let pattern = Regex::new(r"^([0-9]{2}).([0-9]{2})$").unwrap();
    let mut dates = BTreeSet::new();
    for token in tokens {
        let captures = pattern.captures(token)?;
        let day = captures[1].parse().ok()?;
        let month = captures[2].parse().ok()?;
        dates.insert(MonthDay { month, day });
    }
    Some(RecurrenceSpec::ExplicitDates { dates })
}

/// Every token must be a Polish weekday name, case-insensitively.
fn parse_weekday_list(tokens: &[&str]) -> Option<Vec<Weekday>> {
    let mut weekdays: Vec<Weekday> = Vec::new();
    for token in tokens {
        let weekday = weekday_from_name(token)?;
        if !weekdays.contains(&weekday) {
            weekdays.push(weekday);
        }
    }
    weekdays.sort_by_key(|weekday| weekday.num_days_from_monday());
    Some(weekdays)
}

/// The raw text must carry both sub-patterns: `<weekday-list> co <N>
/// tygodnie` and `od dnia <day> <genitive month>`. A text with only one of
/// them is malformed and yields no recurrence.
fn parse_interval_from_anchor(text: &str) -> Option<RecurrenceSpec> {
    let interval_pattern = Regex::new(r"(?i)^(.+?)\s+co\s+([0-9]+)\s+tygodni").unwrap();
    let anchor_pattern = Regex::new(r"(?i)od\s+dnia\s+([0-9]{1,2})\s+(\p{L}+)").unwrap();
    let interval_captures = interval_pattern.captures(text)?;
    let anchor_captures = anchor_pattern.captures(text)?;

    let list_tokens: Vec<&str> = interval_captures
        .get(1)?
        .as_str()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();
    if list_tokens.is_empty() {
        return None;
    }
    let weekdays = parse_weekday_list(&list_tokens)?;
    let interval_weeks: u32 = interval_captures[2].parse().ok()?;
    if interval_weeks == 0 {
        return None;
    }
    let day: u32 = anchor_captures[1].parse().ok()?;
    let month = month_from_genitive(anchor_captures.get(2)?.as_str())?;
    Some(RecurrenceSpec::IntervalWeeklyFromAnchor {
        weekdays,
        interval_weeks,
        anchor: MonthDay { month, day },
        range_end: YEAR_END,
    })
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    let name = name.to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .find(|(weekday_name, _)| *weekday_name == name)
        .map(|(_, weekday)| *weekday)
}

fn month_from_genitive(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTH_NAMES_GENITIVE
        .iter()
        .position(|month_name| *month_name == name)
        .map(|index| index as u32 + 1)
}
