//! # Otto Core Library
//!
//! This library provides the state engine for Otto, a daily training
//! challenge planner. It implements a CLI-first philosophy where every user
//! action is a command against a single state container, and any front end
//! (the bundled CLI or a GUI) is a thin layer that renders its snapshot.
//!
//! ## Architecture
//!
//! - **Planner**: owns the persisted state and consumes [`Command`]s; the
//!   only asynchronous step is challenge generation, driven by
//!   [`generate_today`]
//! - **Storage**: SQLite key-value persistence of the whole state blob and
//!   TOML-based configuration
//! - **Generation**: prompt building, the Gemini client and response
//!   normalization
//! - **Scoring**: 1–10 self-ratings folded into a smoothed progress metric
//!
//! ## Key Components
//!
//! - [`Planner`]: State container and command dispatch
//! - [`PersistenceStore`]: Best-effort load/save of [`AppState`]
//! - [`Config`]: Application configuration management
//! - [`GenerationService`]: Seam for the text generation backend

pub mod catalog;
pub mod clock;
pub mod dial;
pub mod error;
pub mod generation;
pub mod plan;
pub mod planner;
pub mod prompt;
pub mod router;
pub mod scoring;
pub mod state;
pub mod storage;
pub mod views;

pub use clock::{Clock, FixedClock, SystemClock, Today};
pub use dial::{Point, RadialDial};
pub use error::{CoreError, GenerationError, Rejection};
pub use generation::{GeminiClient, GenerationPhase, GenerationService};
pub use plan::SlotUpdate;
pub use planner::{generate_today, run_effect, Command, Effect, Planner, Snapshot};
pub use router::ViewState;
pub use state::{AppState, Challenge, DayPlan, DayResult};
pub use storage::{Config, Database, PersistenceStore};
