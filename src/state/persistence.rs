use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{PlannerError, Result};
use crate::models::{Plan, SavedPlan, ViewMode};
use crate::state::storage::{Storage, StorageEvent};

/// Storage key of the single working plan.
pub const CURRENT_PLAN_KEY: &str = "mealPlannerState";

/// Storage key of the named saved-plans collection.
pub const SAVED_PLANS_KEY: &str = "mealPlannerSavedPlans";

/// Whether the caller obtained confirmation to replace an existing saved plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    Confirmed,
    NotConfirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Appended under a new name.
    Inserted,
    /// Replaced an existing entry in place.
    Replaced,
    /// The name exists and overwrite was not confirmed; nothing was written.
    ConfirmationRequired,
}

/// Reads and writes plans in the two storage scopes.
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    storage: S,
}

impl<S: Storage> PersistenceGateway<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Load the working plan, or the default plan when missing or corrupt.
    pub fn load_current(&mut self) -> Plan {
        let raw = match self.storage.get(CURRENT_PLAN_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Plan::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read current plan, using defaults");
                return Plan::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Current plan is corrupt, using defaults");
            Plan::default()
        })
    }

    /// Persist the working plan. Does nothing (returns `false`) while the view
    /// is bound to a named saved plan.
    pub fn save_current(&mut self, plan: &Plan, view: &ViewMode) -> Result<bool> {
        if view.is_isolated() {
            debug!("Isolated view, current plan not written");
            return Ok(false);
        }
        let json = serde_json::to_string(plan)?;
        self.storage.set(CURRENT_PLAN_KEY, &json)?;
        Ok(true)
    }

    /// All saved plans in stored order; missing or corrupt data is an empty list.
    pub fn list_saved(&mut self) -> Vec<SavedPlan> {
        let raw = match self.storage.get(SAVED_PLANS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read saved plans");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Saved plans are corrupt, treating as empty");
            Vec::new()
        })
    }

    /// Save `plan` under `name`, stamped with the current time.
    pub fn upsert_saved(&mut self, name: &str, plan: &Plan, overwrite: Overwrite) -> Result<UpsertOutcome> {
        self.upsert_saved_at(name, plan, overwrite, Utc::now())
    }

    /// Save `plan` under `name` with an explicit timestamp.
    ///
    /// An existing name is only replaced (in place) with
    /// [`Overwrite::Confirmed`]; otherwise nothing is written.
    pub fn upsert_saved_at(
        &mut self,
        name: &str,
        plan: &Plan,
        overwrite: Overwrite,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::EmptyPlanName);
        }

        let mut saved = self.list_saved();
        let entry = SavedPlan::new(name, plan.clone(), now);

        let outcome = match saved.iter().position(|p| p.name == name) {
            Some(_) if overwrite == Overwrite::NotConfirmed => {
                debug!(name, "Overwrite not confirmed, saved plans unchanged");
                return Ok(UpsertOutcome::ConfirmationRequired);
            }
            Some(pos) => {
                saved[pos] = entry;
                UpsertOutcome::Replaced
            }
            None => {
                saved.push(entry);
                UpsertOutcome::Inserted
            }
        };

        self.write_saved(&saved)?;
        info!(name, ?outcome, "Saved plan");
        Ok(outcome)
    }

    /// Remove the saved plan called `name`; `false` when there was none.
    pub fn delete_saved(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        let mut saved = self.list_saved();
        let Some(pos) = saved.iter().position(|p| p.name == name) else {
            debug!(name, "Nothing to delete");
            return Ok(false);
        };

        saved.remove(pos);
        self.write_saved(&saved)?;
        info!(name, "Deleted saved plan");
        Ok(true)
    }

    /// Look up a saved plan by name.
    pub fn open_saved(&mut self, name: &str) -> Result<Plan> {
        let name = name.trim();
        self.list_saved()
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.plan)
            .ok_or_else(|| PlannerError::PlanNotFound(name.to_string()))
    }

    /// Storage changes made by other contexts.
    pub fn poll_events(&mut self) -> Vec<StorageEvent> {
        self.storage.poll_events()
    }

    fn write_saved(&mut self, saved: &[SavedPlan]) -> Result<()> {
        let json = serde_json::to_string(saved)?;
        self.storage.set(SAVED_PLANS_KEY, &json)
    }
}
