use chrono::Local;
use clap::Parser;
use tracing::{debug, warn};

use crate::cli::{Command, ShellLine, join_words};
use crate::error::{PlannerError, Result};
use crate::interface::prompts::{
    pick_food, prompt_command, prompt_confirm_delete, prompt_confirm_overwrite, prompt_plan_name,
    prompt_yes_no,
};
use crate::interface::render::{display_food_list, display_plan, display_profile, display_saved_plans};
use crate::models::{ProfileUpdate, coerce_number};
use crate::planner::{DeleteFlow, Planner, SaveDecision, SaveFlow, default_plan_name};
use crate::state::{EntrySource, Storage, UpsertOutcome};

/// What a command did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    /// The plan being edited changed.
    Mutated,
    /// The plan was written to the saved collection.
    Saved,
    /// The session switched to another plan.
    Switched,
    Exit,
}

/// Entry numbers are shown 1-based; 0 maps to an index that never exists.
fn to_index(entry: usize) -> usize {
    entry.checked_sub(1).unwrap_or(usize::MAX)
}

fn applied(ok: bool, what: &str) -> Outcome {
    if ok {
        Outcome::Mutated
    } else {
        println!("No such entry: {}", what);
        Outcome::Unchanged
    }
}

/// Run one command against the session.
pub fn execute<S: Storage>(planner: &mut Planner<S>, command: Command) -> Result<Outcome> {
    debug!(?command, "execute");

    let outcome = match command {
        Command::Show => {
            planner.with_update(display_plan);
            Outcome::Unchanged
        }
        Command::Foods { query } => {
            let query = join_words(&query);
            let foods: Vec<_> = if query.is_empty() {
                planner.catalog().iter().collect()
            } else {
                planner.catalog().search(&query)
            };
            display_food_list(&foods, "Foods");
            Outcome::Unchanged
        }
        Command::Add { slot, food, grams } => {
            let query = join_words(&food);
            let food_id = if planner.catalog().is_empty() {
                warn!(food = %query, "Catalog is empty, adding food id unresolved");
                Some(query.clone())
            } else {
                pick_food(planner.catalog(), &query)?
            };

            match food_id {
                Some(id) => {
                    planner.add_entry(slot, &id, grams);
                    Outcome::Mutated
                }
                None => {
                    println!("No matching food found for '{}'", query);
                    Outcome::Unchanged
                }
            }
        }
        Command::Remove { slot, entry } => applied(
            planner.remove_entry(slot, to_index(entry)),
            &format!("{} #{}", slot, entry),
        ),
        Command::Duplicate { slot, entry } => applied(
            planner.duplicate_entry(slot, to_index(entry)),
            &format!("{} #{}", slot, entry),
        ),
        Command::Move { from, entry, to } => applied(
            planner.move_entry(from, to_index(entry), to),
            &format!("{} #{}", from, entry),
        ),
        Command::Copy { from, entry, to } => applied(
            planner.copy_entry(
                EntrySource::Existing {
                    slot: from,
                    index: to_index(entry),
                },
                to,
            ),
            &format!("{} #{}", from, entry),
        ),
        Command::Weight { slot, entry, grams } => applied(
            planner.set_entry_weight(slot, to_index(entry), coerce_number(&grams)),
            &format!("{} #{}", slot, entry),
        ),
        Command::Goal { field, value } => {
            planner.set_goal(field, coerce_number(&value));
            Outcome::Mutated
        }
        Command::Profile(args) => {
            let update = ProfileUpdate::from(args);
            if update.is_empty() {
                display_profile(&planner.plan().profile);
                Outcome::Unchanged
            } else {
                planner.update_profile(&update);
                display_profile(&planner.plan().profile);
                Outcome::Mutated
            }
        }
        Command::DeriveGoals => {
            let goals = planner.derive_goals();
            println!(
                "Goals set from profile: {} kcal, {}g protein, {}g carbs, {}g fat",
                goals.calories, goals.protein, goals.carbs, goals.fat
            );
            Outcome::Mutated
        }
        Command::Reset => {
            planner.reset();
            Outcome::Mutated
        }
        Command::Save { name } => {
            let name = join_words(&name);
            let requested = (!name.is_empty()).then_some(name);
            if run_save_flow(planner, requested)? {
                Outcome::Saved
            } else {
                Outcome::Unchanged
            }
        }
        Command::Open { name } => {
            let name = join_words(&name);
            planner.sync_external_changes();
            match planner.open_saved_plan(&name) {
                Ok(()) => Outcome::Switched,
                Err(PlannerError::PlanNotFound(name)) => {
                    println!("No saved plan named '{}'. Use 'plans' to list them.", name);
                    Outcome::Unchanged
                }
                Err(e) => return Err(e),
            }
        }
        Command::Delete { name } => {
            run_delete_flow(planner, &join_words(&name))?;
            Outcome::Unchanged
        }
        Command::Plans => {
            planner.sync_external_changes();
            display_saved_plans(planner.saved_plans());
            Outcome::Unchanged
        }
        Command::Main => {
            if planner.view().is_isolated() {
                planner.open_main();
                Outcome::Switched
            } else {
                println!("Already on the current plan.");
                Outcome::Unchanged
            }
        }
        Command::Shell => {
            println!("Already in the shell.");
            Outcome::Unchanged
        }
        Command::Exit => Outcome::Exit,
    };

    Ok(outcome)
}

/// Drive the naming and overwrite-confirmation flow. Returns whether the
/// plan was saved.
pub fn run_save_flow<S: Storage>(planner: &mut Planner<S>, requested: Option<String>) -> Result<bool> {
    planner.sync_external_changes();

    let default_name = default_plan_name(Local::now().date_naive());
    let mut flow = SaveFlow::new();
    let mut prefill = flow.request_save(planner.view(), &default_name);
    let mut typed = requested;

    loop {
        let raw = match typed.take() {
            Some(name) => name,
            None => prompt_plan_name(&prefill)?,
        };

        let decision = match flow.submit_name(&raw, planner.saved_plans()) {
            Ok(Some(decision)) => decision,
            Ok(None) => return Ok(false),
            Err(PlannerError::EmptyPlanName) => {
                println!("Please enter a name for the plan.");
                if !prompt_yes_no("Keep naming?", true)? {
                    flow.cancel();
                    println!("Save cancelled.");
                    return Ok(false);
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        let (name, overwrite) = match decision {
            SaveDecision::Save { name, overwrite } => (name, overwrite),
            SaveDecision::NeedsConfirmation { name } => {
                if !prompt_confirm_overwrite(&name)? {
                    if let Some(declined) = flow.decline_overwrite() {
                        prefill = declined;
                    }
                    continue;
                }
                match flow.confirm_overwrite() {
                    Some(SaveDecision::Save { name, overwrite }) => (name, overwrite),
                    _ => return Ok(false),
                }
            }
        };

        match planner.save_current_plan(&name, overwrite)? {
            UpsertOutcome::Inserted => println!("Saved plan '{}'.", name),
            UpsertOutcome::Replaced => println!("Updated plan '{}'.", name),
            UpsertOutcome::ConfirmationRequired => {
                // Another session saved this name since we last looked.
                planner.sync_external_changes();
                prefill = flow.request_save(planner.view(), &default_name);
                typed = Some(name);
                continue;
            }
        }
        return Ok(true);
    }
}

/// Ask before deleting a saved plan. Missing names are reported, not an error.
pub fn run_delete_flow<S: Storage>(planner: &mut Planner<S>, name: &str) -> Result<()> {
    planner.sync_external_changes();

    if !planner.has_saved_plan(name) {
        println!("No saved plan named '{}'.", name);
        return Ok(());
    }

    let mut flow = DeleteFlow::new();
    flow.request_delete(name);

    if !prompt_confirm_delete(name)? {
        flow.cancel();
        println!("Delete cancelled.");
        return Ok(());
    }

    if let Some(name) = flow.confirm() {
        if planner.delete_saved_plan(&name)? {
            println!("Deleted plan '{}'.", name);
        } else {
            println!("No saved plan named '{}'.", name);
        }
    }
    Ok(())
}

/// Interactive session: read commands until `exit`.
///
/// Saved-plan changes from other sessions are picked up before each command.
/// Edits to a saved plan stay in memory until saved; leaving with unsaved
/// edits asks first.
pub fn run_shell<S: Storage>(planner: &mut Planner<S>) -> Result<()> {
    println!("Type 'help' for commands, 'exit' to quit.");
    planner.with_update(display_plan);

    let mut unsaved = false;

    loop {
        planner.sync_external_changes();

        let label = match planner.view().plan_name() {
            Some(name) => format!("plan:{}", name),
            None => "current".to_string(),
        };
        let line = prompt_command(&label)?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => parsed,
            Err(e) => {
                e.print()?;
                continue;
            }
        };

        let leaving = matches!(parsed.command, Command::Exit | Command::Main | Command::Open { .. });
        if leaving && unsaved && !confirm_discard(planner)? {
            continue;
        }

        match execute(planner, parsed.command) {
            Ok(Outcome::Exit) => break,
            Ok(Outcome::Mutated) => unsaved = planner.view().is_isolated(),
            Ok(Outcome::Saved) | Ok(Outcome::Switched) => unsaved = false,
            Ok(Outcome::Unchanged) => {}
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}

/// Offer to save unsaved edits to a saved plan. Returns whether to go on.
fn confirm_discard<S: Storage>(planner: &mut Planner<S>) -> Result<bool> {
    let name = planner.view().plan_name().unwrap_or_default().to_string();
    if prompt_yes_no(&format!("Save changes to '{}' first?", name), true)? {
        return run_save_flow(planner, None);
    }
    prompt_yes_no("Discard changes?", false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealSlot;
    use crate::state::MemoryStorage;

    fn planner() -> Planner<MemoryStorage> {
        let mut planner = Planner::new(MemoryStorage::new());
        planner.add_entry(MealSlot::Breakfast, "oats", 80.0);
        planner.add_entry(MealSlot::Breakfast, "milk", 200.0);
        planner
    }

    #[test]
    fn test_to_index_is_one_based() {
        assert_eq!(to_index(1), 0);
        assert_eq!(to_index(3), 2);
        assert_eq!(to_index(0), usize::MAX);
    }

    #[test]
    fn test_entry_commands_use_display_numbers() {
        let mut planner = planner();
        let outcome = execute(
            &mut planner,
            Command::Move {
                from: MealSlot::Breakfast,
                entry: 2,
                to: MealSlot::Dinner,
            },
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Mutated);
        assert_eq!(planner.plan().meals.dinner[0].food_id, "milk");

        let outcome = execute(
            &mut planner,
            Command::Remove {
                slot: MealSlot::Breakfast,
                entry: 0,
            },
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(planner.plan().meals.breakfast.len(), 1);
    }

    #[test]
    fn test_add_without_catalog_keeps_raw_id() {
        let mut planner = planner();
        let outcome = execute(
            &mut planner,
            Command::Add {
                slot: MealSlot::Snacks,
                food: vec!["greek".to_string(), "yogurt".to_string()],
                grams: 150.0,
            },
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Mutated);
        assert_eq!(planner.plan().meals.snacks[0].food_id, "greek yogurt");
    }

    #[test]
    fn test_weight_and_goal_coerce_text() {
        let mut planner = planner();
        execute(
            &mut planner,
            Command::Weight {
                slot: MealSlot::Breakfast,
                entry: 1,
                grams: "abc".to_string(),
            },
        )
        .unwrap();
        assert_eq!(planner.plan().meals.breakfast[0].weight, 0.0);

        execute(
            &mut planner,
            Command::Goal {
                field: crate::models::GoalField::Carbs,
                value: "250g".to_string(),
            },
        )
        .unwrap();
        assert_eq!(planner.plan().goals.carbs, 250.0);
    }

    #[test]
    fn test_open_missing_plan_is_recoverable() {
        let mut planner = planner();
        let outcome = execute(
            &mut planner,
            Command::Open {
                name: vec!["Ghost".to_string()],
            },
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert!(!planner.view().is_isolated());
    }

    #[test]
    fn test_exit_and_main_outcomes() {
        let mut planner = planner();
        assert_eq!(execute(&mut planner, Command::Exit).unwrap(), Outcome::Exit);
        assert_eq!(execute(&mut planner, Command::Main).unwrap(), Outcome::Unchanged);
    }
}
