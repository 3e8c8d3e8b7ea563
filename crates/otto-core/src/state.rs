//! Persisted application state.
//!
//! `AppState` is the single aggregate written to durable storage. Field
//! names follow the stored JSON shape (camelCase at the top level).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::is_valid_triplet;

/// Format tag of the stored blob. A blob carrying any other tag is discarded.
pub const STATE_VERSION: &str = "1";

/// Number of plan slots, Monday first.
pub const WEEK_LEN: usize = 7;

/// Training focus for one weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub field1: Option<String>,
    pub field2: Option<String>,
    pub field3: Option<String>,
}

impl DayPlan {
    /// All three fields as borrowed strings, if every one is set.
    pub fn triplet(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.field1.as_deref()?,
            self.field2.as_deref()?,
            self.field3.as_deref()?,
        ))
    }

    /// Set and accepted by the catalog.
    pub fn is_valid(&self) -> bool {
        self.triplet()
            .is_some_and(|(f1, f2, f3)| is_valid_triplet(f1, f2, f3))
    }
}

/// Normalized challenge description for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub title: String,
    pub objective: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub est_time_min: Option<i64>,
    pub difficulty: String,
    pub instructions: Vec<String>,
}

/// Self-rating for one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayResult {
    #[serde(rename = "score1to10")]
    pub score: u8,
    pub norm: f64,
    #[serde(rename = "dayScore")]
    pub day_score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(rename = "emaProgress", default)]
    pub ema_progress: f64,
}

/// The whole persisted aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub weekly_plan: [DayPlan; WEEK_LEN],
    pub challenge_by_date: BTreeMap<NaiveDate, Challenge>,
    pub results_by_date: BTreeMap<NaiveDate, DayResult>,
    pub metrics: Metrics,
    /// Provisional dial value for the current date. Not date-scoped.
    pub last_value_moved_today: Option<u8>,
    pub version: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            weekly_plan: Default::default(),
            challenge_by_date: BTreeMap::new(),
            results_by_date: BTreeMap::new(),
            metrics: Metrics::default(),
            last_value_moved_today: None,
            version: STATE_VERSION.to_string(),
        }
    }
}

impl AppState {
    pub fn plan_for(&self, weekday_index: usize) -> Option<&DayPlan> {
        self.weekly_plan.get(weekday_index)
    }

    pub fn challenge_for(&self, date: NaiveDate) -> Option<&Challenge> {
        self.challenge_by_date.get(&date)
    }

    pub fn result_for(&self, date: NaiveDate) -> Option<&DayResult> {
        self.results_by_date.get(&date)
    }

    /// EMA clamped into the displayable range.
    pub fn progress_clamped(&self) -> f64 {
        let ema = self.metrics.ema_progress;
        if ema.is_nan() {
            return 0.0;
        }
        ema.clamp(0.0, 100.0)
    }
}
