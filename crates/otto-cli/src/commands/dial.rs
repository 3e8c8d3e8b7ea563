//! Rating dial commands.

use clap::Subcommand;
use otto_core::{Command, Point};

use super::session;

#[derive(Subcommand)]
pub enum DialAction {
    /// Commit a rating directly
    Set {
        /// Rating from 1 to 10
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        value: u8,
    },
    /// Replay a drag gesture over the dial and commit where it ends
    Drag {
        /// Pointer positions as "x,y" in dial coordinates (center 110,110)
        #[arg(required = true)]
        points: Vec<String>,
    },
}

pub fn run(action: DialAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = session::open()?;
    match action {
        DialAction::Set { value } => {
            session.dispatch(Command::EnterScore(value))?;
        }
        DialAction::Drag { points } => {
            let points = points
                .iter()
                .map(|raw| parse_point(raw))
                .collect::<Result<Vec<_>, _>>()?;
            session.dispatch(Command::PressDial)?;
            for point in points {
                session.dispatch(Command::MoveDial(point))?;
            }
            session.dispatch(Command::ReleaseDial)?;
        }
    }
    match session.planner.borrow().state().last_value_moved_today {
        Some(value) => println!("rating {value}/10"),
        None => println!("no rating committed"),
    }
    session.warn_storage();
    Ok(())
}

fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{raw}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid coordinate in '{raw}'"))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}
