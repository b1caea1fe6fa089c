use tracing::info;

use crate::models::SavedPlan;
use crate::state::persistence::{PersistenceGateway, SAVED_PLANS_KEY};
use crate::state::storage::{Storage, StorageEvent};

/// This context's copy of the saved-plans collection.
///
/// Refreshed after local saves and deletes, and whenever another context
/// touches the saved-plans key. The current-plan key is not
/// followed: each context keeps its own working plan once loaded.
#[derive(Debug, Clone, Default)]
pub struct SavedPlansView {
    plans: Vec<SavedPlan>,
}

impl SavedPlansView {
    pub fn load<S: Storage>(gateway: &mut PersistenceGateway<S>) -> Self {
        Self {
            plans: gateway.list_saved(),
        }
    }

    pub fn plans(&self) -> &[SavedPlan] {
        &self.plans
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plans.iter().map(|p| p.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|n| n == name.trim())
    }

    pub fn refresh<S: Storage>(&mut self, gateway: &mut PersistenceGateway<S>) {
        self.plans = gateway.list_saved();
    }

    /// Reload when `events` include the saved-plans key. Returns whether a
    /// reload happened.
    pub fn apply_events<S: Storage>(
        &mut self,
        events: &[StorageEvent],
        gateway: &mut PersistenceGateway<S>,
    ) -> bool {
        if !events.iter().any(|e| e.key == SAVED_PLANS_KEY) {
            return false;
        }
        self.refresh(gateway);
        info!(count = self.plans.len(), "Saved plans changed in another session");
        true
    }
}
