//! Address-to-view routing.
//!
//! Addresses are hash-style paths (`#/profile/day/2026-10-16`). Parsing is
//! pure; `resolve` applies the current-week constraint on day views.

use chrono::NaiveDate;
use serde::Serialize;

use crate::clock::index_in_week;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "date", rename_all = "snake_case")]
pub enum ViewState {
    Home,
    WeeklyProfile,
    DayDetail(NaiveDate),
}

/// Parsed address before week resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Home,
    Profile,
    /// Raw date segment, not yet validated.
    ProfileDay(String),
}

/// Parse a raw address. Anything unrecognized is `Home`.
pub fn parse_address(raw: &str) -> Address {
    let cleaned = raw.trim().trim_start_matches('#');
    let segments: Vec<&str> = cleaned.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["profile"] => Address::Profile,
        ["profile", "day", iso, ..] => Address::ProfileDay((*iso).to_string()),
        _ => Address::Home,
    }
}

impl ViewState {
    /// Resolve `raw` against the week containing `today`.
    ///
    /// A day outside the current week, or one that is not a valid date,
    /// falls back to the weekly profile.
    pub fn resolve(raw: &str, today: NaiveDate) -> Self {
        match parse_address(raw) {
            Address::Home => ViewState::Home,
            Address::Profile => ViewState::WeeklyProfile,
            Address::ProfileDay(iso) => match NaiveDate::parse_from_str(&iso, "%Y-%m-%d") {
                Ok(date) if index_in_week(today, date).is_some() => ViewState::DayDetail(date),
                _ => ViewState::WeeklyProfile,
            },
        }
    }

    /// Canonical address for this view.
    pub fn address(&self) -> String {
        match self {
            ViewState::Home => "#/home".to_string(),
            ViewState::WeeklyProfile => "#/profile".to_string(),
            ViewState::DayDetail(date) => format!("#/profile/day/{}", date.format("%Y-%m-%d")),
        }
    }
}
