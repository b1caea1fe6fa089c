mod food;
mod meal;
mod numeric;
mod plan;
mod profile;

pub use food::Food;
pub use meal::{MealEntry, MealSlot, Meals};
pub use numeric::{coerce_grams, coerce_number};
pub use plan::{Plan, SavedPlan, ViewMode};
pub use profile::{Gender, GoalField, GoalType, Goals, Profile, ProfileUpdate};
