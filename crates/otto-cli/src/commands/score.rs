//! Rating submission and progress repair.

use otto_core::Command;

use super::session;

pub fn submit() -> Result<(), Box<dyn std::error::Error>> {
    let session = session::open()?;
    session.dispatch(Command::Submit)?;
    let planner = session.planner.borrow();
    let today = planner.today().date;
    if let Some(result) = planner.state().result_for(today) {
        println!("Submitted: {}/10", result.score);
        println!("progress {}%", planner.snapshot().progress_percent);
    }
    session.warn_storage();
    Ok(())
}

pub fn recompute() -> Result<(), Box<dyn std::error::Error>> {
    let session = session::open()?;
    session.dispatch(Command::RecomputeProgress)?;
    println!(
        "emaProgress: {:.1}",
        session.planner.borrow().state().metrics.ema_progress
    );
    session.warn_storage();
    Ok(())
}
