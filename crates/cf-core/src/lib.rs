//! Core domain logic for the carbon footprint tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Activities: the single record shape shared by storage and the API
//! - Emission calculation: turning an activity into kilograms of CO2e
//! - Summaries: totals, per-category and per-day breakdowns over a date window

pub mod activity;
pub mod category;
pub mod emission;
pub mod summary;
pub mod types;

pub use activity::{Activity, NewActivity};
pub use category::{Category, UnknownCategory};
pub use emission::{EmissionCalculator, EmissionFactors, round2};
pub use summary::{AggregatableActivity, DailyPoint, Summary, SummaryWindow, summarize};
pub use types::{DATE_FORMAT, ValidationError, parse_date};
