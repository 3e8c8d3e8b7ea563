//! The planner state container.
//!
//! [`Planner`] owns the persisted [`AppState`] plus the session-only pieces
//! (today, generation phase, current view, dial gesture). Every user action
//! is a [`Command`] handled by exactly one method, which mutates, persists
//! and returns. Challenge generation is the one asynchronous step and is
//! split into [`Planner::begin_generation`] and
//! [`Planner::finish_generation`] around the service call; see
//! [`generate_today`].

use std::cell::RefCell;

use chrono::NaiveDate;
use serde::Serialize;

use crate::clock::{index_in_week, week_dates, Today};
use crate::dial::{Point, RadialDial};
use crate::error::{GenerationError, Rejection};
use crate::generation::{
    classify, GenerationPhase, GenerationRequest, GenerationService, ServiceFailure,
};
use crate::plan::{set_slot, SlotUpdate};
use crate::prompt::build_prompt;
use crate::router::ViewState;
use crate::scoring;
use crate::state::AppState;
use crate::storage::{GenerationConfig, PersistenceStore};
use crate::views::{ChallengeCard, DayEditor, HomeView, ProfileView, Screen, ScorePanel, WeekTile};

/// A discrete user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Go to a hash-style address.
    Navigate(String),
    SetSlot { index: usize, update: SlotUpdate },
    PressDial,
    MoveDial(Point),
    ReleaseDial,
    CancelDial,
    /// Direct entry of a score; commits immediately.
    EnterScore(u8),
    Submit,
    /// Clear a retryable generation error and ask for a new attempt.
    Retry,
    SaveProfile,
    RecomputeProgress,
    /// The host regained focus and re-resolved the calendar day.
    RefreshToday(Today),
    Reset,
}

/// Follow-up work a command asks the host to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Generate { force: bool },
}

/// Read-only picture of the planner for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub today: Today,
    pub view: ViewState,
    pub address: String,
    pub progress_percent: u8,
    pub ema_progress: f64,
    pub storage_notice: Option<&'static str>,
    pub generation: GenerationPhase,
    pub screen: Screen,
}

pub struct Planner {
    state: AppState,
    store: PersistenceStore,
    today: Today,
    phase: GenerationPhase,
    view: ViewState,
    dial: RadialDial,
    generation: GenerationConfig,
    /// Bumped on reset so completions from before it are dropped.
    epoch: u64,
}

impl Planner {
    /// Load state from `store` and start on the home view.
    ///
    /// The stored `last_value_moved_today` carries no date, so a value
    /// committed on an earlier day survives a restart. It is cleared by the
    /// next successful generation for `today`, which must happen before any
    /// score can be entered for a new day.
    pub fn new(mut store: PersistenceStore, today: Today, generation: GenerationConfig) -> Self {
        let state = store.load();
        Self {
            state,
            store,
            today,
            phase: GenerationPhase::Idle,
            view: ViewState::Home,
            dial: RadialDial::default(),
            generation,
            epoch: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn today(&self) -> &Today {
        &self.today
    }

    pub fn phase(&self) -> &GenerationPhase {
        &self.phase
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn storage_notice(&self) -> Option<&'static str> {
        self.store.notice()
    }

    fn persist(&mut self) {
        self.store.save(&self.state);
    }

    fn today_plan_is_valid(&self) -> bool {
        self.state
            .plan_for(self.today.weekday_index)
            .is_some_and(|plan| plan.is_valid())
    }

    /// Handle one command.
    ///
    /// # Errors
    /// Returns a [`Rejection`] when the command does not apply; nothing is
    /// changed in that case.
    pub fn dispatch(&mut self, command: Command) -> Result<Effect, Rejection> {
        match command {
            Command::Navigate(address) => {
                self.navigate(&address);
                Ok(Effect::None)
            }
            Command::SetSlot { index, update } => {
                self.set_slot(index, update)?;
                Ok(Effect::None)
            }
            Command::PressDial => {
                self.ensure_score_input_open()?;
                self.dial.press();
                Ok(Effect::None)
            }
            Command::MoveDial(pointer) => {
                self.dial.move_to(pointer);
                Ok(Effect::None)
            }
            Command::ReleaseDial | Command::CancelDial => {
                if let Some(value) = self.dial.release() {
                    self.commit_score(value)?;
                }
                Ok(Effect::None)
            }
            Command::EnterScore(value) => {
                self.ensure_score_input_open()?;
                self.commit_score(value)?;
                Ok(Effect::None)
            }
            Command::Submit => {
                self.submit()?;
                Ok(Effect::None)
            }
            Command::Retry => self.retry(),
            Command::SaveProfile => Ok(self.save_profile()),
            Command::RecomputeProgress => {
                self.recompute_progress();
                Ok(Effect::None)
            }
            Command::RefreshToday(today) => {
                self.refresh_today(today);
                Ok(Effect::None)
            }
            Command::Reset => {
                self.reset();
                Ok(Effect::None)
            }
        }
    }

    fn navigate(&mut self, address: &str) {
        self.view = ViewState::resolve(address, self.today.date);
        self.dial.cancel();
    }

    fn set_slot(&mut self, index: usize, update: SlotUpdate) -> Result<(), Rejection> {
        let plan = set_slot(&mut self.state.weekly_plan, index, update)?;
        log::debug!("Slot {index} is now {plan:?}");
        self.persist();
        Ok(())
    }

    fn ensure_score_input_open(&self) -> Result<(), Rejection> {
        if self.state.challenge_for(self.today.date).is_none() {
            return Err(Rejection::NoChallenge);
        }
        if self.state.result_for(self.today.date).is_some() {
            return Err(Rejection::AlreadySubmitted);
        }
        Ok(())
    }

    fn commit_score(&mut self, value: u8) -> Result<(), Rejection> {
        if !(crate::dial::DIAL_MIN..=crate::dial::DIAL_MAX).contains(&value) {
            return Err(Rejection::ScoreOutOfRange(i64::from(value)));
        }
        self.state.last_value_moved_today = Some(value);
        self.persist();
        Ok(())
    }

    fn submit(&mut self) -> Result<(), Rejection> {
        let value = self
            .state
            .last_value_moved_today
            .ok_or(Rejection::NoCommittedValue)?;
        let result = scoring::submit(&mut self.state, self.today.date, i64::from(value))?;
        log::info!(
            "Submitted {}/10 for {} (day score {:.1}, progress {:.1})",
            result.score,
            self.today.iso_date(),
            result.day_score,
            self.state.metrics.ema_progress
        );
        self.persist();
        Ok(())
    }

    fn retry(&mut self) -> Result<Effect, Rejection> {
        match self.phase.error() {
            Some(err) if err.is_retryable() => {
                self.phase = GenerationPhase::Idle;
                Ok(Effect::Generate { force: false })
            }
            _ => Err(Rejection::NothingToRetry),
        }
    }

    fn save_profile(&mut self) -> Effect {
        self.persist();
        for (day, plan) in week_dates(self.today.date)
            .iter()
            .zip(self.state.weekly_plan.iter())
        {
            log::info!(
                "{} {} {} / {} / {}",
                day.label,
                day.date.format("%Y-%m-%d"),
                plan.field1.as_deref().unwrap_or(""),
                plan.field2.as_deref().unwrap_or(""),
                plan.field3.as_deref().unwrap_or("")
            );
        }
        self.view = ViewState::Home;
        if self.today_plan_is_valid() {
            Effect::Generate { force: true }
        } else {
            Effect::None
        }
    }

    fn recompute_progress(&mut self) {
        self.state.metrics.ema_progress = scoring::recompute_ema(&self.state.results_by_date);
        self.persist();
    }

    /// Adopt a freshly resolved "today". Returns whether the date changed.
    pub fn refresh_today(&mut self, today: Today) -> bool {
        if today.date == self.today.date {
            self.today = today;
            return false;
        }
        log::info!("Day changed from {} to {}", self.today.iso_date(), today.iso_date());
        self.today = today;
        self.state.last_value_moved_today = None;
        self.dial.cancel();
        if !self.phase.is_generating() {
            self.phase = GenerationPhase::Idle;
        }
        if let ViewState::DayDetail(date) = self.view {
            if index_in_week(self.today.date, date).is_none() {
                self.view = ViewState::WeeklyProfile;
            }
        }
        self.persist();
        true
    }

    fn reset(&mut self) {
        self.store.clear();
        self.state = AppState::default();
        self.phase = GenerationPhase::Idle;
        self.view = ViewState::Home;
        self.dial = RadialDial::default();
        self.epoch += 1;
        log::info!("App state reset");
    }

    /// Run the synchronous guards and, if they pass, enter `Generating`.
    ///
    /// `Ok(None)` means the trigger was a no-op: a request is already in
    /// flight, today's plan is incomplete, or a challenge exists and `force`
    /// is off.
    ///
    /// # Errors
    /// Returns the non-retryable failure when the credential is missing or
    /// the prompt cannot be built. The phase is `Failed` afterwards.
    pub fn begin_generation(
        &mut self,
        force: bool,
    ) -> Result<Option<GenerationRequest>, GenerationError> {
        if self.phase.is_generating() {
            return Ok(None);
        }
        let Some((field1, field2, field3)) = self
            .state
            .plan_for(self.today.weekday_index)
            .filter(|plan| plan.is_valid())
            .and_then(|plan| plan.triplet())
            .map(|(a, b, c)| (a.to_string(), b.to_string(), c.to_string()))
        else {
            return Ok(None);
        };

        let date = self.today.date;
        if self.state.challenge_for(date).is_some() {
            if !force {
                self.phase = GenerationPhase::Succeeded;
                return Ok(None);
            }
            self.state.challenge_by_date.remove(&date);
            self.persist();
        }

        if self.generation.credential().is_none() {
            return Err(self.fail(GenerationError::ConfigurationMissing));
        }

        let prompt = match build_prompt(
            &field1,
            &field2,
            &field3,
            &self.today.iso_date(),
            &self.today.timezone,
        ) {
            Ok(prompt) => prompt,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.phase = GenerationPhase::Generating;
        Ok(Some(GenerationRequest {
            date,
            epoch: self.epoch,
            prompt,
        }))
    }

    fn fail(&mut self, err: GenerationError) -> GenerationError {
        log::warn!("Challenge generation failed: {err}");
        self.phase = GenerationPhase::Failed(err.clone());
        err
    }

    /// Apply the service outcome for `request`.
    ///
    /// A completion for a date that is no longer today is stored under its
    /// own date but leaves today's phase alone.
    ///
    /// # Errors
    /// Returns the classified failure. The phase is `Failed` afterwards when
    /// the request was for today.
    pub fn finish_generation(
        &mut self,
        request: GenerationRequest,
        outcome: Result<String, ServiceFailure>,
    ) -> Result<(), GenerationError> {
        if request.epoch != self.epoch {
            log::debug!("Dropping generation result from before reset");
            return Ok(());
        }
        let for_today = request.date == self.today.date;
        match classify(outcome) {
            Ok(challenge) => {
                log::info!("Stored challenge \"{}\" for {}", challenge.title, request.date);
                self.state.challenge_by_date.insert(request.date, challenge);
                if for_today {
                    self.state.last_value_moved_today = None;
                    self.phase = GenerationPhase::Succeeded;
                } else {
                    self.phase = GenerationPhase::Idle;
                }
                self.persist();
                Ok(())
            }
            Err(err) if for_today => Err(self.fail(err)),
            Err(err) => {
                log::warn!("Challenge generation for {} failed: {err}", request.date);
                self.phase = GenerationPhase::Idle;
                Err(err)
            }
        }
    }

    fn home_view(&self) -> HomeView {
        let date = self.today.date;
        let challenge = self.state.challenge_for(date);
        let card = match (&self.phase, challenge) {
            (GenerationPhase::Failed(err), _) => ChallengeCard::Error {
                message: err.to_string(),
                retryable: err.is_retryable(),
            },
            (GenerationPhase::Generating, _) => ChallengeCard::Generating,
            (_, Some(challenge)) => ChallengeCard::Challenge {
                challenge: challenge.clone(),
            },
            (_, None) if self.today_plan_is_valid() => ChallengeCard::ReadyToGenerate,
            (_, None) => ChallengeCard::NeedsFocus,
        };
        let committed = self.state.last_value_moved_today;
        let score = match (challenge, self.state.result_for(date)) {
            (None, _) => ScorePanel::Hidden,
            (Some(_), Some(result)) => ScorePanel::Submitted {
                score: result.score,
            },
            (Some(_), None) => ScorePanel::Input {
                dial: self.dial.visual(committed),
                can_submit: committed.is_some(),
            },
        };
        HomeView { card, score }
    }

    fn profile_view(&self) -> ProfileView {
        let tiles = week_dates(self.today.date)
            .iter()
            .zip(self.state.weekly_plan.iter())
            .map(|(day, plan)| WeekTile {
                date: day.date,
                label: day.label,
                planned: plan.is_valid(),
                is_today: day.date == self.today.date,
            })
            .collect();
        ProfileView { tiles }
    }

    fn day_editor(&self, date: NaiveDate) -> Option<DayEditor> {
        let index = index_in_week(self.today.date, date)?;
        let label = week_dates(self.today.date)[index].label;
        Some(DayEditor::new(date, index, label, &self.state.weekly_plan[index]))
    }

    /// Everything a renderer needs, computed from current state.
    pub fn snapshot(&self) -> Snapshot {
        let screen = match self.view {
            ViewState::Home => Screen::Home(self.home_view()),
            ViewState::WeeklyProfile => Screen::Profile(self.profile_view()),
            ViewState::DayDetail(date) => match self.day_editor(date) {
                Some(editor) => Screen::DayDetail(editor),
                None => Screen::Profile(self.profile_view()),
            },
        };
        let progress = self.state.progress_clamped();
        Snapshot {
            today: self.today.clone(),
            view: self.view,
            address: self.view.address(),
            progress_percent: progress.round() as u8,
            ema_progress: self.state.metrics.ema_progress,
            storage_notice: self.store.notice(),
            generation: self.phase.clone(),
            screen,
        }
    }

    /// Short diagnostic summary of today.
    pub fn status_lines(&self) -> Vec<String> {
        let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        let plan = &self.state.weekly_plan[self.today.weekday_index];
        vec![
            format!("todayISO: {}", self.today.iso_date()),
            format!("tz: {}", self.today.timezone),
            format!(
                "plan: {}, {}, {}",
                dash(&plan.field1),
                dash(&plan.field2),
                dash(&plan.field3)
            ),
            format!(
                "challenge loaded: {}",
                self.state.challenge_for(self.today.date).is_some()
            ),
            format!("emaProgress: {:.1}", self.state.metrics.ema_progress),
        ]
    }
}

/// Trigger generation for today and wait for it to settle.
///
/// Safe to call while another call is suspended on the service: the second
/// call sees `Generating` and returns at once. The planner is never borrowed
/// across the service call.
///
/// # Errors
/// Returns the failure that left the phase `Failed`.
pub async fn generate_today<S: GenerationService>(
    planner: &RefCell<Planner>,
    service: &S,
    force: bool,
) -> Result<(), GenerationError> {
    let request = planner.borrow_mut().begin_generation(force)?;
    let Some(request) = request else {
        return Ok(());
    };
    let outcome = service
        .generate(&request.prompt.system_prompt, &request.prompt.user_payload)
        .await;
    planner.borrow_mut().finish_generation(request, outcome)
}

/// Run the follow-up work returned by [`Planner::dispatch`].
///
/// # Errors
/// Returns the generation failure, if one was triggered and failed.
pub async fn run_effect<S: GenerationService>(
    planner: &RefCell<Planner>,
    service: &S,
    effect: Effect,
) -> Result<(), GenerationError> {
    match effect {
        Effect::Generate { force } => generate_today(planner, service, force).await,
        Effect::None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::state::Challenge;
    use std::cell::Cell;

    const REPLY: &str = r#"{"title":"Tempo Run","objective":"Run steady.","difficulty":"Focused","instructions":[]}"#;

    struct ScriptedService {
        calls: Cell<usize>,
        reply: Result<String, ServiceFailure>,
    }

    impl ScriptedService {
        fn ok() -> Self {
            Self::replying(Ok(REPLY.to_string()))
        }

        fn replying(reply: Result<String, ServiceFailure>) -> Self {
            Self {
                calls: Cell::new(0),
                reply,
            }
        }
    }

    impl GenerationService for ScriptedService {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, ServiceFailure> {
            self.calls.set(self.calls.get() + 1);
            tokio::task::yield_now().await;
            self.reply.clone()
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    // 2026-10-16 is a Friday, slot 4
    fn friday() -> Today {
        FixedClock::new(date(16)).today()
    }

    fn planner(api_key: &str) -> Planner {
        let generation = GenerationConfig {
            api_key: api_key.to_string(),
            ..GenerationConfig::default()
        };
        Planner::new(PersistenceStore::in_memory("otto-state"), friday(), generation)
    }

    fn planned(api_key: &str) -> Planner {
        let mut p = planner(api_key);
        p.dispatch(Command::SetSlot {
            index: 4,
            update: SlotUpdate::full("aerobics", "running", "walking"),
        })
        .unwrap();
        p
    }

    fn with_challenge(mut p: Planner) -> Planner {
        p.state.challenge_by_date.insert(
            p.today.date,
            Challenge {
                title: "Tempo Run".into(),
                objective: "Run steady.".into(),
                est_time_min: None,
                difficulty: "Focused".into(),
                instructions: vec!["Go.".into()],
            },
        );
        p
    }

    fn home(p: &Planner) -> HomeView {
        match p.snapshot().screen {
            Screen::Home(view) => view,
            other => panic!("expected home, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn concurrent_triggers_make_one_call() {
        let planner = RefCell::new(planned("secret"));
        let service = ScriptedService::ok();
        let (first, second) = tokio::join!(
            generate_today(&planner, &service, false),
            generate_today(&planner, &service, false)
        );
        assert!(first.is_ok() && second.is_ok());
        assert_eq!(service.calls.get(), 1);

        let p = planner.borrow();
        assert_eq!(p.phase(), &GenerationPhase::Succeeded);
        let challenge = p.state().challenge_for(date(16)).unwrap();
        assert_eq!(challenge.title, "Tempo Run");
        assert_eq!(
            challenge.instructions,
            vec!["Follow the prompt and listen to your body."]
        );
    }

    #[tokio::test]
    async fn missing_credential_fails_without_calling_out() {
        let planner = RefCell::new(planned(crate::storage::API_KEY_PLACEHOLDER));
        let service = ScriptedService::ok();
        let err = generate_today(&planner, &service, false).await.unwrap_err();
        assert_eq!(err, GenerationError::ConfigurationMissing);
        assert_eq!(service.calls.get(), 0);

        let mut p = planner.borrow_mut();
        assert_eq!(
            p.phase(),
            &GenerationPhase::Failed(GenerationError::ConfigurationMissing)
        );
        assert!(matches!(
            home(&p).card,
            ChallengeCard::Error { retryable: false, .. }
        ));
        assert_eq!(p.dispatch(Command::Retry), Err(Rejection::NothingToRetry));
    }

    #[tokio::test]
    async fn incomplete_plan_is_a_no_op() {
        let planner = RefCell::new(planner("secret"));
        let service = ScriptedService::ok();
        generate_today(&planner, &service, false).await.unwrap();
        assert_eq!(service.calls.get(), 0);
        assert_eq!(planner.borrow().phase(), &GenerationPhase::Idle);
        assert_eq!(home(&planner.borrow()).card, ChallengeCard::NeedsFocus);
    }

    #[tokio::test]
    async fn cached_challenge_is_reused_unless_forced() {
        let planner = RefCell::new(with_challenge(planned("secret")));
        let service = ScriptedService::replying(Ok(r#"{"title":"Hill Loop"}"#.into()));

        generate_today(&planner, &service, false).await.unwrap();
        assert_eq!(service.calls.get(), 0);
        assert_eq!(planner.borrow().phase(), &GenerationPhase::Succeeded);

        generate_today(&planner, &service, true).await.unwrap();
        assert_eq!(service.calls.get(), 1);
        let p = planner.borrow();
        assert_eq!(p.state().challenge_for(date(16)).unwrap().title, "Hill Loop");
    }

    #[tokio::test]
    async fn forced_regeneration_that_fails_leaves_no_challenge() {
        let planner = RefCell::new(with_challenge(planned("secret")));
        let service = ScriptedService::replying(Err(ServiceFailure::Status(500)));
        assert!(generate_today(&planner, &service, true).await.is_err());
        assert!(planner.borrow().state().challenge_for(date(16)).is_none());
    }

    #[tokio::test]
    async fn retryable_failure_can_be_retried() {
        let planner = RefCell::new(planned("secret"));
        let failing = ScriptedService::replying(Err(ServiceFailure::Status(503)));
        let err = generate_today(&planner, &failing, false).await.unwrap_err();
        assert_eq!(err, GenerationError::ServiceError("503".into()));
        assert_eq!(
            home(&planner.borrow()).card,
            ChallengeCard::Error {
                message: "Gemini error: 503".into(),
                retryable: true,
            }
        );

        let effect = planner.borrow_mut().dispatch(Command::Retry).unwrap();
        assert_eq!(effect, Effect::Generate { force: false });
        assert_eq!(planner.borrow().phase(), &GenerationPhase::Idle);

        let service = ScriptedService::ok();
        run_effect(&planner, &service, effect).await.unwrap();
        assert_eq!(planner.borrow().phase(), &GenerationPhase::Succeeded);
    }

    #[tokio::test]
    async fn unauthorized_is_terminal() {
        let planner = RefCell::new(planned("secret"));
        let service = ScriptedService::replying(Err(ServiceFailure::Status(401)));
        let err = generate_today(&planner, &service, false).await.unwrap_err();
        assert!(!err.is_retryable());
        assert_eq!(
            planner.borrow_mut().dispatch(Command::Retry),
            Err(Rejection::NothingToRetry)
        );
    }

    #[tokio::test]
    async fn new_challenge_clears_committed_value() {
        let mut p = with_challenge(planned("secret"));
        p.dispatch(Command::EnterScore(6)).unwrap();
        assert_eq!(p.state().last_value_moved_today, Some(6));
        let planner = RefCell::new(p);
        generate_today(&planner, &ScriptedService::ok(), true)
            .await
            .unwrap();
        assert_eq!(planner.borrow().state().last_value_moved_today, None);
    }

    #[test]
    fn dial_drag_commits_and_submit_scores() {
        let mut p = with_challenge(planned("secret"));
        let dial = RadialDial::default();

        p.dispatch(Command::PressDial).unwrap();
        p.dispatch(Command::MoveDial(dial.tick_position(4))).unwrap();
        p.dispatch(Command::MoveDial(dial.tick_position(10))).unwrap();
        // provisional only until release
        assert_eq!(p.state().last_value_moved_today, None);
        match home(&p).score {
            ScorePanel::Input { dial, can_submit } => {
                assert_eq!(dial.label, Some(10));
                assert!(!can_submit);
            }
            other => panic!("unexpected panel {other:?}"),
        }

        p.dispatch(Command::ReleaseDial).unwrap();
        assert_eq!(p.state().last_value_moved_today, Some(10));

        p.dispatch(Command::Submit).unwrap();
        let result = p.state().result_for(date(16)).unwrap();
        assert_eq!(result.day_score, 100.0);
        assert_eq!(p.state().metrics.ema_progress, 15.0);
        assert_eq!(p.snapshot().progress_percent, 15);
        assert_eq!(
            home(&p).score.submitted_text().as_deref(),
            Some("Submitted: 10/10")
        );
        assert_eq!(p.dispatch(Command::Submit), Err(Rejection::AlreadySubmitted));
        assert_eq!(p.dispatch(Command::PressDial), Err(Rejection::AlreadySubmitted));
    }

    #[test]
    fn release_without_move_commits_nothing() {
        let mut p = with_challenge(planned("secret"));
        p.dispatch(Command::PressDial).unwrap();
        p.dispatch(Command::CancelDial).unwrap();
        assert_eq!(p.state().last_value_moved_today, None);
        assert_eq!(p.dispatch(Command::Submit), Err(Rejection::NoCommittedValue));
    }

    #[test]
    fn score_input_needs_a_challenge() {
        let mut p = planned("secret");
        assert_eq!(p.dispatch(Command::PressDial), Err(Rejection::NoChallenge));
        assert_eq!(p.dispatch(Command::EnterScore(5)), Err(Rejection::NoChallenge));
        assert_eq!(home(&p).score, ScorePanel::Hidden);
        assert_eq!(home(&p).card, ChallengeCard::ReadyToGenerate);
    }

    #[test]
    fn direct_entry_rejects_out_of_range() {
        let mut p = with_challenge(planned("secret"));
        assert_eq!(
            p.dispatch(Command::EnterScore(11)),
            Err(Rejection::ScoreOutOfRange(11))
        );
        assert_eq!(p.state().last_value_moved_today, None);
    }

    #[test]
    fn day_rollover_resets_session_state() {
        let mut p = with_challenge(planned("secret"));
        p.dispatch(Command::EnterScore(3)).unwrap();
        p.dispatch(Command::Navigate("#/profile/day/2026-10-12".into()))
            .unwrap();
        assert_eq!(p.view(), ViewState::DayDetail(date(12)));

        // Monday of the following week
        assert!(p.refresh_today(Today::new(date(19), "UTC")));
        assert_eq!(p.state().last_value_moved_today, None);
        assert_eq!(p.phase(), &GenerationPhase::Idle);
        assert_eq!(p.view(), ViewState::WeeklyProfile);
        assert!(!p.refresh_today(Today::new(date(19), "UTC")));
    }

    #[test]
    fn completion_for_a_past_day_is_stored_but_not_shown() {
        let mut p = planned("secret");
        let request = p.begin_generation(false).unwrap().unwrap();
        assert!(p.phase().is_generating());

        // Saturday; the request stays in flight across the rollover
        p.refresh_today(Today::new(date(17), "UTC"));
        assert!(p.phase().is_generating());

        p.finish_generation(request, Ok(REPLY.into())).unwrap();
        assert!(p.state().challenge_for(date(16)).is_some());
        assert!(p.state().challenge_for(date(17)).is_none());
        assert_eq!(p.phase(), &GenerationPhase::Idle);
        assert_eq!(home(&p).card, ChallengeCard::NeedsFocus);
    }

    #[test]
    fn reset_drops_in_flight_completion() {
        let mut p = planned("secret");
        let request = p.begin_generation(false).unwrap().unwrap();
        p.dispatch(Command::Reset).unwrap();
        p.finish_generation(request, Ok(REPLY.into())).unwrap();
        assert_eq!(p.state(), &AppState::default());
        assert_eq!(p.phase(), &GenerationPhase::Idle);
        assert_eq!(p.view(), ViewState::Home);
    }

    #[test]
    fn save_profile_goes_home_and_forces_generation() {
        let mut p = planned("secret");
        p.dispatch(Command::Navigate("#/profile".into())).unwrap();
        let effect = p.dispatch(Command::SaveProfile).unwrap();
        assert_eq!(effect, Effect::Generate { force: true });
        assert_eq!(p.view(), ViewState::Home);

        let mut empty = planner("secret");
        assert_eq!(empty.dispatch(Command::SaveProfile), Ok(Effect::None));
    }

    #[test]
    fn recompute_rebuilds_progress_from_history() {
        let mut p = with_challenge(planned("secret"));
        p.dispatch(Command::EnterScore(10)).unwrap();
        p.dispatch(Command::Submit).unwrap();
        p.state.metrics.ema_progress = 99.0;
        p.dispatch(Command::RecomputeProgress).unwrap();
        assert_eq!(p.state().metrics.ema_progress, 15.0);
    }

    #[test]
    fn out_of_week_day_detail_falls_back_to_profile() {
        let mut p = planner("secret");
        p.dispatch(Command::Navigate("profile/day/2099-01-01".into()))
            .unwrap();
        assert_eq!(p.view(), ViewState::WeeklyProfile);
        assert!(matches!(p.snapshot().screen, Screen::Profile(_)));
    }

    #[test]
    fn profile_tiles_mark_planned_days() {
        let mut p = planned("secret");
        p.dispatch(Command::Navigate("#/profile".into())).unwrap();
        let Screen::Profile(view) = p.snapshot().screen else {
            panic!("expected profile");
        };
        assert_eq!(view.tiles.len(), 7);
        assert!(view.tiles[4].planned && view.tiles[4].is_today);
        assert!(!view.tiles[0].planned);
        assert_eq!(view.tiles[0].label, "Mo");
    }

    #[test]
    fn status_lines_describe_today() {
        let p = planned("secret");
        assert_eq!(
            p.status_lines(),
            vec![
                "todayISO: 2026-10-16",
                "tz: UTC",
                "plan: aerobics, running, walking",
                "challenge loaded: false",
                "emaProgress: 0.0",
            ]
        );
    }

    #[test]
    fn state_survives_a_new_planner_on_the_same_store() {
        let mut p = planned("secret");
        p.dispatch(Command::SaveProfile).unwrap();
        let store = std::mem::replace(&mut p.store, PersistenceStore::in_memory("x"));
        let reopened = Planner::new(store, friday(), GenerationConfig::default());
        assert!(reopened.state().weekly_plan[4].is_valid());
    }

    #[tokio::test]
    async fn committed_value_from_an_earlier_day_is_cleared_by_generation() {
        let mut p = with_challenge(planned("secret"));
        p.dispatch(Command::EnterScore(7)).unwrap();
        p.dispatch(Command::SetSlot {
            index: 5,
            update: SlotUpdate::full("mobility", "yoga", "ballet"),
        })
        .unwrap();
        let store = std::mem::replace(&mut p.store, PersistenceStore::in_memory("x"));

        let saturday = FixedClock::new(date(17)).today();
        let generation = GenerationConfig {
            api_key: "secret".into(),
            ..GenerationConfig::default()
        };
        let reopened = Planner::new(store, saturday, generation);
        assert_eq!(reopened.state().last_value_moved_today, Some(7));
        assert_eq!(home(&reopened).score, ScorePanel::Hidden);

        let planner = RefCell::new(reopened);
        generate_today(&planner, &ScriptedService::ok(), false)
            .await
            .unwrap();
        let p = planner.borrow();
        assert_eq!(p.state().last_value_moved_today, None);
        assert!(matches!(
            home(&p).score,
            ScorePanel::Input { can_submit: false, .. }
        ));
    }
}
