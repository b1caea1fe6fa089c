use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{Gender, GoalField, GoalType, MealSlot, ProfileUpdate};
use crate::planner::DEFAULT_ENTRY_GRAMS;

/// Meal planner: place foods into meals, track nutrition against daily goals,
/// and keep named plans.
#[derive(Parser, Debug)]
#[command(name = "meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding the current plan and the saved plans.
    #[arg(short, long, default_value = ".meal_planner")]
    pub data_dir: PathBuf,

    /// Path to the food catalog JSON file.
    #[arg(short, long, default_value = "data/foods.json")]
    pub foods: PathBuf,

    /// Work on a saved plan instead of the current plan.
    #[arg(short, long)]
    pub plan: Option<String>,
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the plan, per-meal totals and the daily summary.
    Show,

    /// List catalog foods, optionally filtered by a search term.
    Foods {
        query: Vec<String>,
    },

    /// Add a food to the end of a meal.
    Add {
        slot: MealSlot,

        /// Food id or name.
        #[arg(required = true)]
        food: Vec<String>,

        /// Amount in grams.
        #[arg(short, long, default_value_t = DEFAULT_ENTRY_GRAMS)]
        grams: f64,
    },

    /// Remove an entry (numbered as shown).
    Remove { slot: MealSlot, entry: usize },

    /// Insert a copy of an entry right after it.
    Duplicate { slot: MealSlot, entry: usize },

    /// Move an entry to the end of another meal.
    Move {
        from: MealSlot,
        entry: usize,
        to: MealSlot,
    },

    /// Copy an entry to the end of another meal.
    Copy {
        from: MealSlot,
        entry: usize,
        to: MealSlot,
    },

    /// Change an entry's amount in grams.
    Weight {
        slot: MealSlot,
        entry: usize,
        grams: String,
    },

    /// Set one daily goal (calories, protein, carbs or fat).
    Goal { field: GoalField, value: String },

    /// Show or edit the profile used to derive goals.
    Profile(ProfileArgs),

    /// Replace the goals with targets derived from the profile.
    DeriveGoals,

    /// Empty all meals (goals and profile are kept).
    Reset,

    /// Save the plan under a name.
    Save { name: Vec<String> },

    /// Open a saved plan by name.
    Open {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Delete a saved plan.
    Delete {
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// List saved plans.
    Plans,

    /// Leave a saved plan and return to the current plan (shell only).
    Main,

    /// Start an interactive session.
    Shell,

    /// Leave the interactive session.
    Exit,
}

impl Default for Command {
    fn default() -> Self {
        Command::Show
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ProfileArgs {
    /// Body weight in kg.
    #[arg(long)]
    pub weight: Option<f64>,

    /// Height in cm.
    #[arg(long)]
    pub height: Option<f64>,

    #[arg(long)]
    pub age: Option<f64>,

    /// male or other.
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Activity multiplier (1.2 sedentary to 1.9 very active).
    #[arg(long)]
    pub activity: Option<f64>,

    /// cut, maintain or bulk.
    #[arg(long)]
    pub goal_type: Option<GoalType>,
}

impl From<ProfileArgs> for ProfileUpdate {
    fn from(args: ProfileArgs) -> Self {
        ProfileUpdate {
            weight: args.weight,
            height: args.height,
            age: args.age,
            gender: args.gender,
            activity: args.activity,
            goal_type: args.goal_type,
        }
    }
}

/// Join multi-word arguments such as food or plan names.
pub fn join_words(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}
