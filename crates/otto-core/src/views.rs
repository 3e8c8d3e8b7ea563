//! Read-only view models derived from the planner.

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::{primary_options, secondary_options};
use crate::dial::DialVisual;
use crate::state::{Challenge, DayPlan};

pub const GENERATING_TEXT: &str = "Contacting Gemini for today's challenge...";
pub const NEEDS_FOCUS_TEXT: &str =
    "Set today's training focus in the profile tab to generate a challenge.";

/// What the challenge card shows, highest priority first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChallengeCard {
    Error { message: String, retryable: bool },
    Generating,
    ReadyToGenerate,
    NeedsFocus,
    Challenge { challenge: Challenge },
}

impl ChallengeCard {
    pub fn status_text(&self) -> Option<&str> {
        match self {
            ChallengeCard::Error { message, .. } => Some(message),
            ChallengeCard::Generating => Some(GENERATING_TEXT),
            ChallengeCard::NeedsFocus => Some(NEEDS_FOCUS_TEXT),
            _ => None,
        }
    }
}

/// Dial and submit area under the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorePanel {
    Hidden,
    Input { dial: DialVisual, can_submit: bool },
    Submitted { score: u8 },
}

impl ScorePanel {
    pub fn submitted_text(&self) -> Option<String> {
        match self {
            ScorePanel::Submitted { score } => Some(format!("Submitted: {score}/10")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub card: ChallengeCard,
    pub score: ScorePanel,
}

/// One weekday tile on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekTile {
    pub date: NaiveDate,
    pub label: &'static str,
    pub planned: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub tiles: Vec<WeekTile>,
}

/// Editor for one day of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEditor {
    pub date: NaiveDate,
    pub index: usize,
    pub label: &'static str,
    pub plan: DayPlan,
    pub primary_options: &'static [&'static str],
    /// Shared by the second and third field. Empty until a primary is chosen.
    pub secondary_options: &'static [&'static str],
    pub status: &'static str,
}

impl DayEditor {
    pub fn new(date: NaiveDate, index: usize, label: &'static str, plan: &DayPlan) -> Self {
        Self {
            date,
            index,
            label,
            plan: plan.clone(),
            primary_options: primary_options(),
            secondary_options: plan.field1.as_deref().map(secondary_options).unwrap_or(&[]),
            status: crate::plan::slot_status(plan),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Home(HomeView),
    Profile(ProfileView),
    DayDetail(DayEditor),
}
