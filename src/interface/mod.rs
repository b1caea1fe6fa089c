pub mod commands;
pub mod prompts;
pub mod render;

pub use commands::{Outcome, execute, run_delete_flow, run_save_flow, run_shell};
pub use prompts::{
    pick_food, prompt_command, prompt_confirm_delete, prompt_confirm_overwrite, prompt_plan_name,
    prompt_yes_no,
};
pub use render::{
    TerminalView, display_food_list, display_goal_report, display_plan, display_profile,
    display_saved_plans,
};
