mod persistence;
mod plan_state;
mod storage;
mod sync;

pub use persistence::{
    CURRENT_PLAN_KEY, Overwrite, PersistenceGateway, SAVED_PLANS_KEY, UpsertOutcome,
};
pub use plan_state::{EntrySource, PlanState};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageEvent};
pub use sync::SavedPlansView;
