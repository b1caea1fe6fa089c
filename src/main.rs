use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use meal_planner_rs::catalog::load_catalog;
use meal_planner_rs::cli::{Cli, Command};
use meal_planner_rs::error::{PlannerError, Result};
use meal_planner_rs::interface::{
    Outcome, TerminalView, execute, prompt_yes_no, run_save_flow, run_shell,
};
use meal_planner_rs::planner::Planner;
use meal_planner_rs::state::FileStorage;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log level comes from `RUST_LOG`; warnings and errors only by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let storage = FileStorage::open(&cli.data_dir)?;
    debug!(dir = %cli.data_dir.display(), "Opened plan storage");

    let mut planner = Planner::new(storage);
    planner.install_catalog(load_catalog(&cli.foods));
    if planner.catalog().is_empty() {
        eprintln!(
            "No foods loaded from {}; nutrition totals will read zero.",
            cli.foods.display()
        );
    }

    if let Some(name) = cli.plan.as_deref() {
        match planner.open_saved_plan(name) {
            Ok(()) => {}
            Err(PlannerError::PlanNotFound(name)) => {
                println!("No saved plan named '{}'. Use 'plans' to list them.", name);
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }

    planner.subscribe(Box::new(TerminalView));

    if command == Command::Shell {
        return run_shell(&mut planner);
    }

    let outcome = execute(&mut planner, command)?;

    // Edits to a saved plan live only in this process; offer to keep them.
    if outcome == Outcome::Mutated && planner.view().is_isolated() {
        let name = planner.view().plan_name().unwrap_or_default().to_string();
        if prompt_yes_no(&format!("Save changes to '{}'?", name), true)? {
            run_save_flow(&mut planner, None)?;
        }
    }

    Ok(())
}
