use tracing::debug;

use crate::models::{
    GoalField, Goals, MealEntry, MealSlot, Meals, Plan, Profile, ProfileUpdate, coerce_grams,
};

/// Where a copied entry comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum EntrySource {
    /// An entry already placed in a slot.
    Existing { slot: MealSlot, index: usize },
    /// A free-standing entry (e.g. carried by a drag payload).
    Literal(MealEntry),
}

/// The mutable plan aggregate: meals, goals and profile.
///
/// Every operation either applies completely or leaves the plan untouched.
/// Operations addressing an entry by index are no-ops when the index is out
/// of range and report that by returning `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanState {
    plan: Plan,
}

impl PlanState {
    pub fn new(plan: Plan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn meals(&self) -> &Meals {
        &self.plan.meals
    }

    pub fn goals(&self) -> &Goals {
        &self.plan.goals
    }

    pub fn profile(&self) -> &Profile {
        &self.plan.profile
    }

    pub fn entry(&self, slot: MealSlot, index: usize) -> Option<&MealEntry> {
        self.plan.meals.slot(slot).get(index)
    }

    /// Replace the whole plan (used when switching views).
    pub fn replace(&mut self, plan: Plan) {
        self.plan = plan;
    }

    /// Append a food to the end of a slot. The food id is not validated.
    pub fn add_entry(&mut self, slot: MealSlot, food_id: &str, grams: f64) -> bool {
        self.plan
            .meals
            .slot_mut(slot)
            .push(MealEntry::new(food_id, coerce_grams(grams)));
        true
    }

    pub fn remove_entry(&mut self, slot: MealSlot, index: usize) -> bool {
        let entries = self.plan.meals.slot_mut(slot);
        if index >= entries.len() {
            debug!(%slot, index, "remove_entry: index out of range");
            return false;
        }
        entries.remove(index);
        true
    }

    /// Insert a copy of the entry right after it.
    pub fn duplicate_entry(&mut self, slot: MealSlot, index: usize) -> bool {
        let entries = self.plan.meals.slot_mut(slot);
        let Some(copy) = entries.get(index).cloned() else {
            debug!(%slot, index, "duplicate_entry: index out of range");
            return false;
        };
        entries.insert(index + 1, copy);
        true
    }

    /// Remove an entry and append it to `to`. Within one slot this moves the
    /// entry to the end.
    pub fn move_entry(&mut self, from: MealSlot, index: usize, to: MealSlot) -> bool {
        let source = self.plan.meals.slot_mut(from);
        if index >= source.len() {
            debug!(%from, index, "move_entry: index out of range");
            return false;
        }
        let entry = source.remove(index);
        self.plan.meals.slot_mut(to).push(entry);
        true
    }

    /// Append a copy of `source` to `to`; the source is untouched.
    pub fn copy_entry(&mut self, source: EntrySource, to: MealSlot) -> bool {
        let entry = match source {
            EntrySource::Existing { slot, index } => match self.entry(slot, index) {
                Some(entry) => entry.clone(),
                None => {
                    debug!(%slot, index, "copy_entry: index out of range");
                    return false;
                }
            },
            EntrySource::Literal(entry) => entry,
        };
        self.plan.meals.slot_mut(to).push(entry);
        true
    }

    /// Set an entry's amount; negative or non-finite amounts become 0.
    pub fn set_entry_weight(&mut self, slot: MealSlot, index: usize, grams: f64) -> bool {
        match self.plan.meals.slot_mut(slot).get_mut(index) {
            Some(entry) => {
                entry.weight = coerce_grams(grams);
                true
            }
            None => {
                debug!(%slot, index, "set_entry_weight: index out of range");
                false
            }
        }
    }

    /// Overwrite one goal; non-finite values become 0.
    pub fn set_goal(&mut self, field: GoalField, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        self.plan.goals.set(field, value);
    }

    pub fn set_goals(&mut self, goals: Goals) {
        self.plan.goals = goals;
    }

    pub fn update_profile(&mut self, update: &ProfileUpdate) {
        update.apply(&mut self.plan.profile);
    }

    /// Empty all slots. Goals and profile are kept.
    pub fn reset(&mut self) {
        self.plan.meals.clear();
    }
}
