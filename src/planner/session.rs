use tracing::{error, info};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{GoalField, Goals, MealSlot, Plan, ProfileUpdate, SavedPlan, ViewMode};
use crate::planner::calculations::{GoalReport, PlanTotals, sum_by_slot};
use crate::planner::goals::derive_goals;
use crate::state::{
    EntrySource, Overwrite, PersistenceGateway, PlanState, SavedPlansView, Storage, UpsertOutcome,
};

/// What observers see after a transition.
#[derive(Debug, Clone, Copy)]
pub struct PlanUpdate<'a> {
    pub plan: &'a Plan,
    pub totals: &'a PlanTotals,
    pub view: &'a ViewMode,
    pub catalog: &'a Catalog,
}

/// Receives a notification after every state transition.
pub trait PlanObserver {
    fn plan_changed(&mut self, update: &PlanUpdate<'_>);

    fn saved_plans_changed(&mut self, _plans: &[SavedPlan]) {}
}

/// One planning session: the plan being edited, the view it is bound to,
/// the catalog, and the storage it persists to.
///
/// Every mutating request runs synchronously as persist (unless isolated),
/// recompute totals, notify observers.
pub struct Planner<S: Storage> {
    state: PlanState,
    view: ViewMode,
    catalog: Catalog,
    gateway: PersistenceGateway<S>,
    saved: SavedPlansView,
    observers: Vec<Box<dyn PlanObserver>>,
}

impl<S: Storage> Planner<S> {
    /// Start on the current plan. The catalog is empty until
    /// [`Planner::install_catalog`] is called.
    pub fn new(storage: S) -> Self {
        let mut gateway = PersistenceGateway::new(storage);
        let plan = gateway.load_current();
        let saved = SavedPlansView::load(&mut gateway);

        Self {
            state: PlanState::new(plan),
            view: ViewMode::Main,
            catalog: Catalog::default(),
            gateway,
            saved,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn PlanObserver>) {
        self.observers.push(observer);
    }

    pub fn install_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.notify_plan();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn plan(&self) -> &Plan {
        self.state.plan()
    }

    pub fn view(&self) -> &ViewMode {
        &self.view
    }

    pub fn totals(&self) -> PlanTotals {
        sum_by_slot(&self.state.plan().meals, &self.catalog)
    }

    /// Run `f` on a view of the session as observers would see it.
    pub fn with_update<R>(&self, f: impl FnOnce(&PlanUpdate<'_>) -> R) -> R {
        let totals = self.totals();
        f(&PlanUpdate {
            plan: self.state.plan(),
            totals: &totals,
            view: &self.view,
            catalog: &self.catalog,
        })
    }

    pub fn goal_report(&self) -> GoalReport {
        GoalReport::new(&self.totals().daily, self.state.goals())
    }

    pub fn saved_plans(&self) -> &[SavedPlan] {
        self.saved.plans()
    }

    pub fn has_saved_plan(&self, name: &str) -> bool {
        self.saved.contains(name)
    }

    // --- Plan edits ---

    pub fn add_entry(&mut self, slot: MealSlot, food_id: &str, grams: f64) -> bool {
        let applied = self.state.add_entry(slot, food_id, grams);
        self.commit();
        applied
    }

    pub fn remove_entry(&mut self, slot: MealSlot, index: usize) -> bool {
        let applied = self.state.remove_entry(slot, index);
        self.commit();
        applied
    }

    pub fn duplicate_entry(&mut self, slot: MealSlot, index: usize) -> bool {
        let applied = self.state.duplicate_entry(slot, index);
        self.commit();
        applied
    }

    pub fn move_entry(&mut self, from: MealSlot, index: usize, to: MealSlot) -> bool {
        let applied = self.state.move_entry(from, index, to);
        self.commit();
        applied
    }

    pub fn copy_entry(&mut self, source: EntrySource, to: MealSlot) -> bool {
        let applied = self.state.copy_entry(source, to);
        self.commit();
        applied
    }

    pub fn set_entry_weight(&mut self, slot: MealSlot, index: usize, grams: f64) -> bool {
        let applied = self.state.set_entry_weight(slot, index, grams);
        self.commit();
        applied
    }

    pub fn set_goal(&mut self, field: GoalField, value: f64) {
        self.state.set_goal(field, value);
        self.commit();
    }

    pub fn update_profile(&mut self, update: &ProfileUpdate) {
        self.state.update_profile(update);
        self.commit();
    }

    /// Replace the goals with ones derived from the profile. Only runs on
    /// request, so hand-edited goals are never overwritten behind the user's back.
    pub fn derive_goals(&mut self) -> Goals {
        let goals = derive_goals(self.state.profile());
        self.state.set_goals(goals);
        self.commit();
        goals
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.commit();
    }

    // --- Saved plans ---

    /// Save the plan being edited under `name`.
    ///
    /// In an isolated view a successful save rebinds the view to `name`, so
    /// later saves target that entry.
    pub fn save_current_plan(&mut self, name: &str, overwrite: Overwrite) -> Result<UpsertOutcome> {
        let outcome = self
            .gateway
            .upsert_saved(name, self.state.plan(), overwrite)?;
        if outcome == UpsertOutcome::ConfirmationRequired {
            // Another session saved this name since the view was loaded.
            if !self.saved.contains(name) {
                self.refresh_saved();
            }
            return Ok(outcome);
        }

        if self.view.is_isolated() {
            self.view = ViewMode::Isolated {
                name: name.trim().to_string(),
            };
        }
        self.refresh_saved();
        Ok(outcome)
    }

    /// Switch to an isolated view of a saved plan. On error the session is
    /// left unchanged.
    pub fn open_saved_plan(&mut self, name: &str) -> Result<()> {
        let plan = self.gateway.open_saved(name)?;
        self.state.replace(plan);
        self.view = ViewMode::Isolated {
            name: name.trim().to_string(),
        };
        info!(name = name.trim(), "Opened saved plan");
        self.notify_plan();
        Ok(())
    }

    /// Leave an isolated view and go back to the current plan.
    pub fn open_main(&mut self) {
        let plan = self.gateway.load_current();
        self.state.replace(plan);
        self.view = ViewMode::Main;
        self.notify_plan();
    }

    pub fn delete_saved_plan(&mut self, name: &str) -> Result<bool> {
        let deleted = self.gateway.delete_saved(name)?;
        if deleted {
            self.refresh_saved();
        }
        Ok(deleted)
    }

    /// Pick up saved-plan changes made by other sessions on the same storage.
    pub fn sync_external_changes(&mut self) -> bool {
        let events = self.gateway.poll_events();
        let changed = self.saved.apply_events(&events, &mut self.gateway);
        if changed {
            self.notify_saved();
        }
        changed
    }

    fn commit(&mut self) {
        if let Err(e) = self.gateway.save_current(self.state.plan(), &self.view) {
            error!(error = %e, "Failed to persist current plan");
        }
        self.notify_plan();
    }

    fn refresh_saved(&mut self) {
        self.saved.refresh(&mut self.gateway);
        self.notify_saved();
    }

    fn notify_plan(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let totals = self.totals();
        let update = PlanUpdate {
            plan: self.state.plan(),
            totals: &totals,
            view: &self.view,
            catalog: &self.catalog,
        };
        for observer in self.observers.iter_mut() {
            observer.plan_changed(&update);
        }
    }

    fn notify_saved(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.saved_plans_changed(self.saved.plans());
        }
    }
}
