//! Planner setup shared by the commands.

use std::cell::RefCell;

use otto_core::error::Result;
use otto_core::storage::{Config, Database, PersistenceStore};
use otto_core::{
    run_effect, Clock, Command, Effect, GeminiClient, Planner, Rejection, SystemClock,
};

pub struct Session {
    pub planner: RefCell<Planner>,
    pub config: Config,
}

/// Load config and state. A database that cannot be opened leaves the
/// session running without persistence.
pub fn open() -> Result<Session> {
    let config = Config::load()?;
    let key = config.storage.state_key.clone();
    let store = match Database::open() {
        Ok(db) => PersistenceStore::new(Box::new(db), key),
        Err(e) => {
            log::error!("{e}");
            PersistenceStore::unavailable(key)
        }
    };
    let today = SystemClock::with_timezone(config.general.timezone.clone()).today();
    let planner = Planner::new(store, today, config.effective_generation());
    Ok(Session {
        planner: RefCell::new(planner),
        config,
    })
}

impl Session {
    pub fn dispatch(&self, command: Command) -> std::result::Result<Effect, Rejection> {
        self.planner.borrow_mut().dispatch(command)
    }

    /// Run a follow-up effect to completion on a local runtime.
    pub fn run(&self, effect: Effect) -> Result<()> {
        if effect == Effect::None {
            return Ok(());
        }
        let client = GeminiClient::new(&self.config.effective_generation());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run_effect(&self.planner, &client, effect))?;
        Ok(())
    }

    /// Print the sticky storage notice, if any.
    pub fn warn_storage(&self) {
        if let Some(notice) = self.planner.borrow().storage_notice() {
            eprintln!("warning: {notice}");
        }
    }
}
