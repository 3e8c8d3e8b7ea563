//! Full data reset.

use otto_core::Command;

use super::session;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let session = session::open()?;
    session.dispatch(Command::Reset)?;
    println!("all data cleared");
    Ok(())
}
