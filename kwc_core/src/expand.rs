//! Expansion of recurrences into the concrete dates of one year.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

use crate::recurrence::{MonthDay, RecurrenceSpec};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// The (day, month) pair does not exist in the target year.
    #[error("no such calendar date: {day:02}.{month:02}.{year}")]
    InvalidDate { day: u32, month: u32, year: i32 },
}

/// Result of expanding one recurrence: the dates it denotes, ascending and
/// deduplicated, plus one error per date token that could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub dates: BTreeSet<NaiveDate>,
    pub errors: Vec<ExpandError>,
}

/// Compute the concrete collection dates a recurrence denotes within `year`.
///
/// Jan 1 and Dec 31 of the year are valid members in every branch.
pub fn expand(spec: &RecurrenceSpec, year: i32) -> Expansion {
    let mut expansion = Expansion::default();
    match spec {
        RecurrenceSpec::ExplicitDates { dates } => {
            for month_day in dates {
                if let Some(date) = resolve(*month_day, year, &mut expansion.errors) {
                    expansion.dates.insert(date);
                }
            }
        }
        RecurrenceSpec::WeeklyByWeekday {
            weekdays,
            range_start,
            range_end,
        } => {
            let start = resolve(*range_start, year, &mut expansion.errors);
            let end = resolve(*range_end, year, &mut expansion.errors);
            let (Some(start), Some(end)) = (start, end) else {
                return expansion;
            };
            for date in start.iter_days().take_while(|date| *date <= end) {
                if weekdays.contains(&date.weekday()) {
                    expansion.dates.insert(date);
                }
            }
        }
        RecurrenceSpec::IntervalWeeklyFromAnchor {
            weekdays,
            interval_weeks,
            anchor,
            range_end,
        } => {
            let anchor = resolve(*anchor, year, &mut expansion.errors);
            let end = resolve(*range_end, year, &mut expansion.errors);
            let (Some(anchor), Some(end)) = (anchor, end) else {
                return expansion;
            };
            let step = Duration::weeks(i64::from(*interval_weeks));
            let mut week = week_start(anchor);
            while week <= end {
                for offset in 0..7 {
                    let date = week + Duration::days(offset);
                    if date < anchor || date > end {
                        continue;
                    }
                    if weekdays.contains(&date.weekday()) {
                        expansion.dates.insert(date);
                    }
                }
                week = week + step;
            }
        }
    }
    expansion
}

fn resolve(month_day: MonthDay, year: i32, errors: &mut Vec<ExpandError>) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(year, month_day.month, month_day.day);
    if date.is_none() {
        errors.push(ExpandError::InvalidDate {
            day: month_day.day,
            month: month_day.month,
            year,
        });
    }
    date
}

/// Monday of the week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use crate::recurrence::parse_schedule_text;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn expand_text(text: &str, year: i32) -> Expansion {
        expand(&parse_schedule_text(text).unwrap(), year)
    }

    #[test]
    fn test_expand_explicit_dates() {
        let expansion = expand_text("03.04,17.04,01.05", 2024);
        assert_eq!(
            expansion.dates.into_iter().collect::<Vec<_>>(),
            vec![date(2024, 4, 3), date(2024, 4, 17), date(2024, 5, 1)]
        );
        assert_eq!(expansion.errors, vec![]);
    }

    #[test]
    fn test_expand_explicit_dates_reports_invalid_tokens() {
        let expansion = expand_text("30.02,03.04", 2024);
        assert_eq!(
            expansion.dates.into_iter().collect::<Vec<_>>(),
            vec![date(2024, 4, 3)]
        );
        assert_eq!(
            expansion.errors,
            vec![ExpandError::InvalidDate {
                day: 30,
                month: 2,
                year: 2024,
            }]
        );
    }

    #[test]
    fn test_expand_weekly_covers_the_whole_year() {
        let expansion = expand_text("poniedziałek,czwartek", 2024);
        // 2024 starts on a Monday, so it holds 53 Mondays and 52 Thursdays.
        assert_eq!(expansion.dates.len(), 105);
        assert!(expansion.dates.contains(&date(2024, 1, 1)));
        assert!(!expansion.dates.contains(&date(2024, 1, 2)));
        assert!(expansion.dates.contains(&date(2024, 12, 30)));
        assert_eq!(expansion.errors, vec![]);
    }

    #[test]
    fn test_expand_weekly_same_weekday_spacing() {
        let expansion = expand_text("poniedziałek,czwartek", 2024);
        let mondays: Vec<NaiveDate> = expansion
            .dates
            .into_iter()
            .filter(|date| date.weekday() == Weekday::Mon)
            .collect();
        for pair in mondays.windows(2) {
            assert_eq!(pair[1].signed_duration_since(pair[0]), Duration::days(7));
        }
    }

    #[test]
    fn test_expand_interval_from_anchor() {
        let expansion = expand_text("wtorek, piątek co 2 tygodnie od dnia 4 stycznia", 2024);
        let dates: Vec<NaiveDate> = expansion.dates.iter().copied().collect();
        // The anchor week's Tuesday precedes the anchor and is dropped.
        assert_eq!(dates[0], date(2024, 1, 5));
        assert!(expansion.dates.contains(&date(2024, 1, 16)));
        assert!(expansion.dates.contains(&date(2024, 1, 19)));
        assert!(!expansion.dates.contains(&date(2024, 1, 2)));
        assert!(!expansion.dates.contains(&date(2024, 1, 9)));
        // Dec 31 is a Tuesday of an included week.
        assert!(expansion.dates.contains(&date(2024, 12, 31)));
        assert_eq!(expansion.errors, vec![]);
    }

    #[test]
    fn test_expand_interval_same_weekday_spacing() {
        let expansion = expand_text("wtorek, piątek co 2 tygodnie od dnia 4 stycznia", 2024);
        let fridays: Vec<NaiveDate> = expansion
            .dates
            .into_iter()
            .filter(|date| date.weekday() == Weekday::Fri)
            .collect();
        for pair in fridays.windows(2) {
            assert_eq!(pair[1].signed_duration_since(pair[0]), Duration::days(14));
        }
    }

    #[test]
    fn test_expand_interval_starts_at_or_after_anchor() {
        let expansion = expand_text("poniedziałek co 3 tygodnie od dnia 10 czerwca", 2024);
        // Jun 10 2024 is itself a Monday.
        let anchor = date(2024, 6, 10);
        assert_eq!(expansion.dates.iter().next().copied(), Some(anchor));
        assert!(expansion.dates.iter().all(|occurrence| *occurrence >= anchor));
    }

    #[test]
    fn test_expand_interval_reports_invalid_anchor() {
        let expansion = expand_text("wtorek co 2 tygodnie od dnia 30 lutego", 2024);
        assert!(expansion.dates.is_empty());
        assert_eq!(
            expansion.errors,
            vec![ExpandError::InvalidDate {
                day: 30,
                month: 2,
                year: 2024,
            }]
        );
    }

    #[test]
    fn test_expand_is_idempotent() {
        let spec = parse_schedule_text("poniedziałek,czwartek").unwrap();
        assert_eq!(expand(&spec, 2024), expand(&spec, 2024));
    }
}
