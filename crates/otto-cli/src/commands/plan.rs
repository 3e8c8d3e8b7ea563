//! Weekly plan commands.

use chrono::NaiveDate;
use clap::Subcommand;
use otto_core::catalog::{primary_options, secondary_options};
use otto_core::clock::{index_in_week, week_dates, WEEKDAY_ABBREVS};
use otto_core::plan::slot_status;
use otto_core::{Command, SlotUpdate};
use serde::Serialize;

use super::session;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Show this week's plan
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update one day. Omitted fields keep their value; an empty value clears
    /// the field. A new primary field clears the other two.
    Set {
        /// Day: weekday (mo..su), index (0 = Monday) or a date in this week
        day: String,
        /// Training category
        #[arg(long)]
        field1: Option<String>,
        /// First focus within the category
        #[arg(long)]
        field2: Option<String>,
        /// Second focus within the category
        #[arg(long)]
        field3: Option<String>,
    },
    /// Clear one day
    Clear {
        /// Day: weekday (mo..su), index (0 = Monday) or a date in this week
        day: String,
    },
    /// List the allowed values for each field
    Options {
        /// Category whose focus options to list
        primary: Option<String>,
    },
}

#[derive(Serialize)]
struct PlanRow {
    day: &'static str,
    date: NaiveDate,
    field1: Option<String>,
    field2: Option<String>,
    field3: Option<String>,
    valid: bool,
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    if let PlanAction::Options { primary } = &action {
        print_options(primary.as_deref())?;
        return Ok(());
    }

    let session = session::open()?;
    let today = session.planner.borrow().today().date;

    match action {
        PlanAction::Show { json } => {
            let planner = session.planner.borrow();
            let rows: Vec<PlanRow> = week_dates(today)
                .iter()
                .zip(planner.state().weekly_plan.iter())
                .map(|(day, plan)| PlanRow {
                    day: day.label,
                    date: day.date,
                    field1: plan.field1.clone(),
                    field2: plan.field2.clone(),
                    field3: plan.field3.clone(),
                    valid: plan.is_valid(),
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    let marker = if row.date == today { "*" } else { " " };
                    println!(
                        "{marker}{} {}  {} / {} / {}  {}",
                        row.day,
                        row.date,
                        row.field1.as_deref().unwrap_or("-"),
                        row.field2.as_deref().unwrap_or("-"),
                        row.field3.as_deref().unwrap_or("-"),
                        if row.valid { "ok" } else { "" }
                    );
                }
            }
        }
        PlanAction::Set {
            day,
            field1,
            field2,
            field3,
        } => {
            let index = parse_day(&day, today)?;
            let field = |value: Option<String>| value.map(|v| Some(v).filter(|v| !v.is_empty()));
            let update = SlotUpdate {
                field1: field(field1),
                field2: field(field2),
                field3: field(field3),
            };
            session.dispatch(Command::SetSlot { index, update })?;
            let planner = session.planner.borrow();
            println!("{}", slot_status(&planner.state().weekly_plan[index]));
        }
        PlanAction::Clear { day } => {
            let index = parse_day(&day, today)?;
            session.dispatch(Command::SetSlot {
                index,
                update: SlotUpdate::clear(),
            })?;
            println!("cleared {}", WEEKDAY_ABBREVS[index]);
        }
        PlanAction::Options { .. } => {}
    }
    session.warn_storage();
    Ok(())
}

fn print_options(primary: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    match primary {
        None => {
            for option in primary_options() {
                println!("{option}");
            }
        }
        Some(primary) => {
            let options = secondary_options(primary);
            if options.is_empty() {
                return Err(format!("unknown category: {primary}").into());
            }
            for option in options {
                println!("{option}");
            }
        }
    }
    Ok(())
}

/// Resolve a day argument to a plan slot index.
fn parse_day(raw: &str, today: NaiveDate) -> Result<usize, Box<dyn std::error::Error>> {
    let lowered = raw.trim().to_lowercase();
    if let Some(index) = WEEKDAY_ABBREVS
        .iter()
        .position(|abbrev| abbrev.to_lowercase() == lowered)
    {
        return Ok(index);
    }
    if let Ok(index) = lowered.parse::<usize>() {
        // range is checked by the planner
        return Ok(index);
    }
    let date = NaiveDate::parse_from_str(&lowered, "%Y-%m-%d")
        .map_err(|_| format!("unrecognized day: {raw}"))?;
    index_in_week(today, date).ok_or_else(|| format!("{date} is not in the current week").into())
}
