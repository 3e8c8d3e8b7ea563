//! Address resolution.

use otto_core::views::Screen;
use otto_core::Command;

use super::session;
use super::today::print_home;

pub fn run(address: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = session::open()?;
    session.dispatch(Command::Navigate(address.to_string()))?;
    let snapshot = session.planner.borrow().snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.screen)?);
        return Ok(());
    }

    println!("{}", snapshot.address);
    match &snapshot.screen {
        Screen::Home(_) => print_home(&snapshot),
        Screen::Profile(view) => {
            for tile in &view.tiles {
                let marker = if tile.is_today { "*" } else { " " };
                let planned = if tile.planned { "planned" } else { "" };
                println!("{marker}{} {}  {planned}", tile.label, tile.date);
            }
        }
        Screen::DayDetail(editor) => {
            println!("{} {}", editor.label, editor.date);
            println!("field1: {}", editor.plan.field1.as_deref().unwrap_or("-"));
            println!("field2: {}", editor.plan.field2.as_deref().unwrap_or("-"));
            println!("field3: {}", editor.plan.field3.as_deref().unwrap_or("-"));
            println!("{}", editor.status);
        }
    }
    Ok(())
}
