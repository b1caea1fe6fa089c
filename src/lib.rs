pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use catalog::{Catalog, load_catalog};
pub use error::{PlannerError, Result};
pub use models::{Food, MealEntry, MealSlot, Plan};
pub use planner::Planner;
