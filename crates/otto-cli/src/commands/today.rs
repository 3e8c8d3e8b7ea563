//! Home screen output.

use otto_core::views::{ChallengeCard, HomeView, Screen, ScorePanel};
use otto_core::{Command, Snapshot};

use super::session;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = session::open()?;
    session.dispatch(Command::Navigate("#/home".into()))?;
    let snapshot = session.planner.borrow().snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_home(&snapshot);
    }
    session.warn_storage();
    Ok(())
}

pub fn status() -> Result<(), Box<dyn std::error::Error>> {
    let session = session::open()?;
    for line in session.planner.borrow().status_lines() {
        println!("{line}");
    }
    session.warn_storage();
    Ok(())
}

pub fn print_home(snapshot: &Snapshot) {
    println!(
        "{} ({})  progress {}%",
        snapshot.today.iso_date(),
        snapshot.today.timezone,
        snapshot.progress_percent
    );
    if let Screen::Home(view) = &snapshot.screen {
        print_home_view(view);
    }
}

fn print_home_view(view: &HomeView) {
    match &view.card {
        ChallengeCard::Challenge { challenge } => {
            println!();
            println!("{}", challenge.title);
            println!("{}", challenge.objective);
            let mut chips = vec![challenge.difficulty.clone()];
            if let Some(minutes) = challenge.est_time_min {
                chips.push(format!("{minutes} min"));
            }
            println!("[{}]", chips.join("] ["));
            for (i, step) in challenge.instructions.iter().enumerate() {
                println!("  {}. {step}", i + 1);
            }
        }
        ChallengeCard::ReadyToGenerate => {
            println!("No challenge yet. Run `otto generate` to create today's challenge.");
        }
        ChallengeCard::Error { retryable, .. } => {
            if let Some(text) = view.card.status_text() {
                println!("{text}");
            }
            if *retryable {
                println!("Run `otto retry` to try again.");
            }
        }
        other => {
            if let Some(text) = other.status_text() {
                println!("{text}");
            }
        }
    }

    match &view.score {
        ScorePanel::Hidden => {}
        ScorePanel::Input { dial, can_submit } => {
            let ticks: String = dial
                .active
                .iter()
                .map(|on| if *on { '●' } else { '○' })
                .collect();
            let label = dial
                .label
                .map_or_else(|| "-".to_string(), |v| v.to_string());
            println!();
            println!("Rating {ticks} {label}/10");
            if *can_submit {
                println!("Run `otto submit` to record it.");
            } else {
                println!("Set a rating with `otto dial set <1-10>`.");
            }
        }
        ScorePanel::Submitted { .. } => {
            if let Some(text) = view.score.submitted_text() {
                println!();
                println!("{text}");
            }
        }
    }
}
