//! Challenge generation commands.

use otto_core::{Effect, GenerationPhase};

use super::session;
use super::today::print_home;

pub fn run(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = session::open()?;
    session.run(Effect::Generate { force })?;

    let planner = session.planner.borrow();
    if *planner.phase() == GenerationPhase::Idle {
        println!("Set today's training focus first (`otto plan set`).");
    } else {
        print_home(&planner.snapshot());
    }
    session.warn_storage();
    Ok(())
}

/// Failures live only for the process that hit them, so a retry from the
/// shell is a plain non-forced trigger.
pub fn retry() -> Result<(), Box<dyn std::error::Error>> {
    run(false)
}
