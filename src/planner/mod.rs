pub mod calculations;
pub mod constants;
pub mod goals;
pub mod session;
pub mod workflow;

pub use calculations::{
    GoalReport, Macros, PlanTotals, Progress, progress, round_half_up, scale, sum, sum_by_slot,
};
pub use constants::*;
pub use goals::{basal_rate, daily_expenditure, derive_goals};
pub use session::{PlanObserver, PlanUpdate, Planner};
pub use workflow::{DeleteFlow, DeleteState, SaveDecision, SaveFlow, SaveState, default_plan_name};
