use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{Food, GoalField, Goals, MealEntry, MealSlot, Meals};
use crate::planner::constants::{PROGRESS_CAP_PERCENT, REFERENCE_GRAMS};

/// Calories and macronutrients for some amount of food.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    pub fn get(&self, field: GoalField) -> f64 {
        match field {
            GoalField::Calories => self.calories,
            GoalField::Protein => self.protein,
            GoalField::Carbs => self.carbs,
            GoalField::Fat => self.fat,
        }
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

impl Sum for Macros {
    fn sum<I: Iterator<Item = Macros>>(iter: I) -> Macros {
        iter.fold(Macros::default(), Add::add)
    }
}

/// Scale a food's per-100g nutrition to `grams`. No rounding.
pub fn scale(food: &Food, grams: f64) -> Macros {
    let ratio = grams / REFERENCE_GRAMS;
    Macros {
        calories: food.calories * ratio,
        protein: food.protein * ratio,
        carbs: food.carbs * ratio,
        fat: food.fat * ratio,
    }
}

/// Sum the nutrition of `entries`, skipping foods missing from the catalog.
pub fn sum(entries: &[MealEntry], catalog: &Catalog) -> Macros {
    entries
        .iter()
        .filter_map(|entry| match catalog.get(&entry.food_id) {
            Some(food) => Some(scale(food, entry.weight)),
            None => {
                debug!(food_id = %entry.food_id, "Skipping entry with unknown food");
                None
            }
        })
        .sum()
}

/// Per-slot totals plus the grand total for the day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanTotals {
    pub by_slot: BTreeMap<MealSlot, Macros>,
    pub daily: Macros,
}

impl PlanTotals {
    pub fn slot(&self, slot: MealSlot) -> Macros {
        self.by_slot.get(&slot).copied().unwrap_or_default()
    }
}

pub fn sum_by_slot(meals: &Meals, catalog: &Catalog) -> PlanTotals {
    let by_slot: BTreeMap<MealSlot, Macros> = meals
        .iter()
        .map(|(slot, entries)| (slot, sum(entries, catalog)))
        .collect();
    let daily = by_slot.values().copied().sum();

    PlanTotals { by_slot, daily }
}

/// Round half up, as the goal inputs and summary chips display numbers.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Consumption against one goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub current: f64,
    pub goal: f64,
    /// Share of the goal reached, capped at 100.
    pub percent: f64,
    pub exceeded: bool,
}

pub fn progress(current: f64, goal: f64) -> Progress {
    let percent = if goal > 0.0 {
        (current / goal * 100.0).min(PROGRESS_CAP_PERCENT)
    } else if current > 0.0 {
        PROGRESS_CAP_PERCENT
    } else {
        0.0
    };

    Progress {
        current,
        goal,
        percent,
        exceeded: current > goal,
    }
}

/// Progress rows for each goal field, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalReport {
    pub rows: Vec<(GoalField, Progress)>,
}

impl GoalReport {
    pub fn new(daily: &Macros, goals: &Goals) -> Self {
        let rows = GoalField::ALL
            .into_iter()
            .map(|field| (field, progress(daily.get(field), goals.get(field))))
            .collect();
        Self { rows }
    }

    pub fn any_exceeded(&self) -> bool {
        self.rows.iter().any(|(_, p)| p.exceeded)
    }
}
