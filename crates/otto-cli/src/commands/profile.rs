//! Weekly profile commands.

use clap::Subcommand;
use otto_core::Command;

use super::session;
use super::today::print_home;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Save the weekly plan and regenerate today's challenge when today is planned
    Save,
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = session::open()?;
    match action {
        ProfileAction::Save => {
            let effect = session.dispatch(Command::SaveProfile)?;
            println!("profile saved");
            session.run(effect)?;
            print_home(&session.planner.borrow().snapshot());
        }
    }
    session.warn_storage();
    Ok(())
}
