//! `meditrack-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the domain error model, medicine identifiers, and calendar-date handling
//! shared by the analytics subsystem and the HTTP boundary.

pub mod calendar;
pub mod error;
pub mod id;

pub use calendar::{days_between, parse_calendar_date, weekday_index};
pub use error::{DomainError, DomainResult};
pub use id::MedicineId;
