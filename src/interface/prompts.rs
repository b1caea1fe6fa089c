use dialoguer::{Confirm, Input, Select};

use crate::catalog::{Catalog, FoodMatch};
use crate::error::Result;

/// Prompt for a plan name, prefilled with `prefill`.
pub fn prompt_plan_name(prefill: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt("Plan name")
        .with_initial_text(prefill)
        .allow_empty(true)
        .interact_text()?;
    Ok(input)
}

pub fn prompt_confirm_overwrite(name: &str) -> Result<bool> {
    prompt_yes_no(
        &format!("A plan named '{}' already exists. Overwrite it?", name),
        false,
    )
}

pub fn prompt_confirm_delete(name: &str) -> Result<bool> {
    prompt_yes_no(&format!("Delete saved plan '{}'?", name), false)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Read one shell command line.
pub fn prompt_command(label: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    Ok(input)
}

/// Resolve free text to a catalog food id, asking the user to pick among
/// fuzzy matches. `None` when nothing matched or the user declined.
pub fn pick_food(catalog: &Catalog, query: &str) -> Result<Option<String>> {
    let candidates = match catalog.resolve(query) {
        FoodMatch::Exact(food) => return Ok(Some(food.id.clone())),
        FoodMatch::NoMatch => return Ok(None),
        FoodMatch::Candidates(candidates) => candidates,
    };

    if candidates.len() == 1 {
        let food = candidates[0];
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", food.name))
            .default(true)
            .interact()?;
        return Ok(confirm.then(|| food.id.clone()));
    }

    // Multiple matches - let user select
    let options: Vec<String> = candidates
        .iter()
        .take(5)
        .map(|f| format!("{} ({})", f.name, f.id))
        .collect();

    let mut selection_options = options.clone();
    selection_options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&selection_options)
        .default(0)
        .interact()?;

    Ok((selection < options.len()).then(|| candidates[selection].id.clone()))
}
