//! Confirmation flows for saving and deleting named plans.
//!
//! Each flow value owns its pending request, so a save and a delete (or two
//! saves in different sessions) can be in progress without interfering.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::models::{SavedPlan, ViewMode};
use crate::state::Overwrite;

/// Name offered when saving from the main view.
pub fn default_plan_name(today: NaiveDate) -> String {
    format!("Plan {}", today.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SaveState {
    #[default]
    Idle,
    NamingPlan {
        prefill: String,
    },
    ConfirmingOverwrite {
        name: String,
    },
}

/// What the caller should do after a save-flow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDecision {
    /// Write the plan under `name`.
    Save { name: String, overwrite: Overwrite },
    /// `name` exists; ask before replacing it.
    NeedsConfirmation { name: String },
}

#[derive(Debug, Clone, Default)]
pub struct SaveFlow {
    state: SaveState,
}

impl SaveFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SaveState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SaveState::Idle
    }

    /// Start naming. The prefill is the bound plan's name in an isolated
    /// view, else `default_name`. Returns the prefill.
    pub fn request_save(&mut self, view: &ViewMode, default_name: &str) -> String {
        let prefill = view.plan_name().unwrap_or(default_name).to_string();
        self.state = SaveState::NamingPlan {
            prefill: prefill.clone(),
        };
        prefill
    }

    /// Submit the typed name.
    ///
    /// An empty name keeps the flow in `NamingPlan` and fails with
    /// [`PlannerError::EmptyPlanName`]. Submitting outside `NamingPlan` is
    /// an invalid transition and returns `Ok(None)`.
    pub fn submit_name(&mut self, raw: &str, existing: &[SavedPlan]) -> Result<Option<SaveDecision>> {
        if !matches!(self.state, SaveState::NamingPlan { .. }) {
            debug!(state = ?self.state, "submit_name ignored");
            return Ok(None);
        }

        let name = raw.trim();
        if name.is_empty() {
            return Err(PlannerError::EmptyPlanName);
        }

        if existing.iter().any(|p| p.name == name) {
            self.state = SaveState::ConfirmingOverwrite {
                name: name.to_string(),
            };
            return Ok(Some(SaveDecision::NeedsConfirmation {
                name: name.to_string(),
            }));
        }

        self.state = SaveState::Idle;
        Ok(Some(SaveDecision::Save {
            name: name.to_string(),
            overwrite: Overwrite::NotConfirmed,
        }))
    }

    /// Accept the overwrite; back to idle.
    pub fn confirm_overwrite(&mut self) -> Option<SaveDecision> {
        match std::mem::take(&mut self.state) {
            SaveState::ConfirmingOverwrite { name } => Some(SaveDecision::Save {
                name,
                overwrite: Overwrite::Confirmed,
            }),
            other => {
                debug!(state = ?other, "confirm_overwrite ignored");
                self.state = other;
                None
            }
        }
    }

    /// Refuse the overwrite; back to naming with the refused name prefilled.
    pub fn decline_overwrite(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            SaveState::ConfirmingOverwrite { name } => {
                self.state = SaveState::NamingPlan {
                    prefill: name.clone(),
                };
                Some(name)
            }
            other => {
                debug!(state = ?other, "decline_overwrite ignored");
                self.state = other;
                None
            }
        }
    }

    /// Abandon the flow from any state.
    pub fn cancel(&mut self) {
        self.state = SaveState::Idle;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteState {
    #[default]
    Idle,
    ConfirmingDelete {
        name: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DeleteFlow {
    state: DeleteState,
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    pub fn request_delete(&mut self, name: &str) {
        self.state = DeleteState::ConfirmingDelete {
            name: name.trim().to_string(),
        };
    }

    /// Confirm; returns the name to delete.
    pub fn confirm(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            DeleteState::ConfirmingDelete { name } => Some(name),
            DeleteState::Idle => {
                debug!("confirm ignored, no delete pending");
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = DeleteState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Plan;
    use chrono::Utc;

    fn saved(names: &[&str]) -> Vec<SavedPlan> {
        names
            .iter()
            .map(|n| SavedPlan::new(*n, Plan::default(), Utc::now()))
            .collect()
    }

    #[test]
    fn test_prefill_uses_bound_plan_name() {
        let mut flow = SaveFlow::new();
        let view = ViewMode::Isolated {
            name: "Bulk week".to_string(),
        };
        assert_eq!(flow.request_save(&view, "Plan 2026-10-18"), "Bulk week");

        let mut flow = SaveFlow::new();
        assert_eq!(flow.request_save(&ViewMode::Main, "Plan 2026-10-18"), "Plan 2026-10-18");
    }

    #[test]
    fn test_unique_name_saves_directly() {
        let mut flow = SaveFlow::new();
        flow.request_save(&ViewMode::Main, "x");
        let decision = flow.submit_name(" Fresh ", &saved(&["Old"])).unwrap();
        assert_eq!(
            decision,
            Some(SaveDecision::Save {
                name: "Fresh".to_string(),
                overwrite: Overwrite::NotConfirmed
            })
        );
        assert!(flow.is_idle());
    }

    #[test]
    fn test_empty_name_stays_naming() {
        let mut flow = SaveFlow::new();
        flow.request_save(&ViewMode::Main, "x");
        assert!(matches!(
            flow.submit_name("  ", &[]),
            Err(PlannerError::EmptyPlanName)
        ));
        assert!(matches!(flow.state(), SaveState::NamingPlan { .. }));
    }

    #[test]
    fn test_existing_name_confirm_and_decline() {
        let existing = saved(&["Old"]);

        let mut flow = SaveFlow::new();
        flow.request_save(&ViewMode::Main, "x");
        assert_eq!(
            flow.submit_name("Old", &existing).unwrap(),
            Some(SaveDecision::NeedsConfirmation {
                name: "Old".to_string()
            })
        );
        assert_eq!(flow.decline_overwrite(), Some("Old".to_string()));
        assert_eq!(
            flow.state(),
            &SaveState::NamingPlan {
                prefill: "Old".to_string()
            }
        );

        flow.submit_name("Old", &existing).unwrap();
        assert_eq!(
            flow.confirm_overwrite(),
            Some(SaveDecision::Save {
                name: "Old".to_string(),
                overwrite: Overwrite::Confirmed
            })
        );
        assert!(flow.is_idle());
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut flow = SaveFlow::new();
        assert_eq!(flow.confirm_overwrite(), None);
        assert_eq!(flow.decline_overwrite(), None);
        assert_eq!(flow.submit_name("A", &[]).unwrap(), None);
        assert!(flow.is_idle());

        flow.request_save(&ViewMode::Main, "x");
        flow.cancel();
        assert!(flow.is_idle());
    }

    #[test]
    fn test_delete_flow() {
        let mut flow = DeleteFlow::new();
        assert_eq!(flow.confirm(), None);

        flow.request_delete("Old");
        flow.cancel();
        assert_eq!(flow.confirm(), None);

        flow.request_delete("Old");
        assert_eq!(flow.confirm(), Some("Old".to_string()));
        assert_eq!(flow.state(), &DeleteState::Idle);
    }

    #[test]
    fn test_flows_are_independent() {
        let mut save = SaveFlow::new();
        let mut delete = DeleteFlow::new();

        save.request_save(&ViewMode::Main, "x");
        save.submit_name("Old", &saved(&["Old"])).unwrap();
        delete.request_delete("Other");

        assert_eq!(delete.confirm(), Some("Other".to_string()));
        assert!(matches!(save.state(), SaveState::ConfirmingOverwrite { name } if name == "Old"));
    }

    #[test]
    fn test_default_plan_name() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(default_plan_name(day), "Plan 2026-10-18");
    }
}
