//! This crate turns Kraków's free-text waste collection schedules into concrete
//! collection dates and iCalendar files.
//!
//! The street data files publish one schedule text per address and waste type,
//! written in one of several informal Polish conventions ("03.04,17.04",
//! "poniedziałek, czwartek", "wtorek co 2 tygodnie od dnia 4 stycznia").

pub use ical;

pub mod aggregate;
pub mod calendar_event;
pub mod calendar_file;
pub mod expand;
pub mod recurrence;
pub mod schedule;
pub mod street_client;
pub mod waste_type;
