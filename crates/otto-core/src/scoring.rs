//! Self-rating scoring and the smoothed progress metric.
//!
//! A 1–10 rating maps to a 0–100 day score. Day scores fold into an
//! exponential moving average that is rounded to one decimal after every
//! update, so replaying the stored history reproduces the stored value
//! exactly.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::Rejection;
use crate::state::{AppState, DayResult};

/// Smoothing factor. Higher reacts faster to the latest day.
pub const EMA_ALPHA: f64 = 0.15;

pub const MIN_SCORE: i64 = 1;
pub const MAX_SCORE: i64 = 10;

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derive the stored result for a rating.
///
/// # Errors
/// Rejects ratings outside `1..=10`.
pub fn score_result(score: i64) -> Result<DayResult, Rejection> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(Rejection::ScoreOutOfRange(score));
    }
    let norm = (score - 1) as f64 / 9.0;
    let day_score = (norm * 1000.0).round() / 10.0;
    Ok(DayResult {
        score: score as u8,
        norm,
        day_score,
    })
}

/// One EMA step, rounded to one decimal.
pub fn ema_step(ema: f64, day_score: f64) -> f64 {
    round_tenths(ema * (1.0 - EMA_ALPHA) + day_score * EMA_ALPHA)
}

/// Rebuild the EMA from the full history, oldest date first.
pub fn recompute_ema(results: &BTreeMap<NaiveDate, DayResult>) -> f64 {
    results
        .values()
        .fold(0.0, |ema, result| ema_step(ema, result.day_score))
}

/// Record today's rating and fold it into the progress metric.
///
/// The state is untouched when the submission is rejected.
///
/// # Errors
/// Rejects when today has no challenge, today already has a result, or the
/// rating is out of range.
pub fn submit(state: &mut AppState, today: NaiveDate, score: i64) -> Result<DayResult, Rejection> {
    if state.challenge_for(today).is_none() {
        return Err(Rejection::NoChallenge);
    }
    if state.result_for(today).is_some() {
        return Err(Rejection::AlreadySubmitted);
    }
    let result = score_result(score)?;
    state.metrics.ema_progress = ema_step(state.metrics.ema_progress, result.day_score);
    state.results_by_date.insert(today, result);
    Ok(result)
}
