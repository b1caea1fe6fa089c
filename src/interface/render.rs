use crate::models::{Food, Profile, SavedPlan};
use crate::planner::{
    GoalReport, Macros, PlanObserver, PlanUpdate, Progress, basal_rate, daily_expenditure, round_half_up,
    scale,
};

const BAR_WIDTH: usize = 20;

/// Display the plan: title, each slot with its entries and totals.
pub fn display_plan(update: &PlanUpdate<'_>) {
    let title = match update.view.plan_name() {
        Some(name) => format!("=== Meal Plan: {} ===", name),
        None => "=== Meal Plan (current) ===".to_string(),
    };

    println!();
    println!("{}", title);

    for (slot, entries) in update.plan.meals.iter() {
        println!();
        println!("{:<10} {}", slot.title(), macro_chips(&update.totals.slot(slot)));

        if entries.is_empty() {
            println!("    (empty)");
            continue;
        }

        for (i, entry) in entries.iter().enumerate() {
            match update.catalog.get(&entry.food_id) {
                Some(food) => {
                    let m = scale(food, entry.weight);
                    println!(
                        "  {:>2}. {:<28} {:>6.0}g  {}",
                        i + 1,
                        food.name,
                        entry.weight,
                        macro_chips(&m)
                    );
                }
                None => println!(
                    "  {:>2}. {:<28} {:>6.0}g  (not in catalog)",
                    i + 1,
                    entry.food_id,
                    entry.weight
                ),
            }
        }
    }

    println!();
    display_goal_report(&GoalReport::new(&update.totals.daily, &update.plan.goals));
}

/// Rounded "kcal P C F" summary.
pub fn macro_chips(m: &Macros) -> String {
    format!(
        "{:>5} kcal | {}P {}C {}F",
        round_half_up(m.calories),
        round_half_up(m.protein),
        round_half_up(m.carbs),
        round_half_up(m.fat)
    )
}

/// Display daily totals against goals as progress bars.
pub fn display_goal_report(report: &GoalReport) {
    println!("--- Daily Summary ---");
    for (field, progress) in &report.rows {
        println!(
            "{:<9} {} {}",
            field.label(),
            progress_bar(progress),
            progress_text(progress, field.unit())
        );
    }
    println!();
}

fn progress_bar(progress: &Progress) -> String {
    let filled = ((progress.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let fill_char = if progress.exceeded { '!' } else { '#' };
    format!(
        "[{}{}]",
        fill_char.to_string().repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

fn progress_text(progress: &Progress, unit: &str) -> String {
    let text = format!(
        "{} / {}{}",
        round_half_up(progress.current),
        progress.goal,
        unit
    );
    if progress.exceeded {
        format!("{}  (over)", text)
    } else {
        text
    }
}

/// Display the saved-plans collection in stored order.
pub fn display_saved_plans(plans: &[SavedPlan]) {
    if plans.is_empty() {
        println!("Saved plans: (none)");
        return;
    }

    println!();
    println!("=== Saved Plans ({}) ===", plans.len());
    for (i, saved) in plans.iter().enumerate() {
        println!(
            "{:>3}. {:<24} saved {}  ({} items)",
            i + 1,
            saved.name,
            saved.date.format("%Y-%m-%d %H:%M"),
            saved.plan.meals.entry_count()
        );
    }
    println!();
}

/// Display a simple list of foods with their per-100g nutrition.
pub fn display_food_list(foods: &[&Food], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    let width = foods.iter().map(|f| f.id.len()).max().unwrap_or(10);
    for food in foods {
        println!(
            "  {:<width$}  {} - {} cal, P:{} C:{} F:{} per 100g",
            food.id,
            food.name,
            food.calories,
            food.protein,
            food.carbs,
            food.fat,
            width = width
        );
    }

    println!();
}

/// Display the profile and the energy figures derived from it.
pub fn display_profile(profile: &Profile) {
    println!();
    println!("=== Profile ===");
    println!("Weight:    {} kg", profile.weight);
    println!("Height:    {} cm", profile.height);
    println!("Age:       {}", profile.age);
    println!("Gender:    {:?}", profile.gender);
    println!("Activity:  x{}", profile.activity);
    println!("Goal:      {:?}", profile.goal_type);
    println!(
        "BMR {:.0} kcal, TDEE {:.0} kcal",
        basal_rate(profile),
        daily_expenditure(profile)
    );
    println!();
}

/// Re-renders the terminal after every change.
#[derive(Debug, Default)]
pub struct TerminalView;

impl PlanObserver for TerminalView {
    fn plan_changed(&mut self, update: &PlanUpdate<'_>) {
        display_plan(update);
    }

    fn saved_plans_changed(&mut self, plans: &[SavedPlan]) {
        display_saved_plans(plans);
    }
}
