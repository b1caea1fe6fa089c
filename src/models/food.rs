use serde::{Deserialize, Serialize};

/// A catalog food with its nutrition per 100g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,

    pub name: String,

    pub calories: f64,

    pub protein: f64,

    pub carbs: f64,

    pub fat: f64,
}

impl Food {
    /// Basic validation: finite, non-negative nutrients and a non-empty id.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
            && [self.calories, self.protein, self.carbs, self.fat]
                .into_iter()
                .all(|v| v.is_finite() && v >= 0.0)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} ({}): {} cal, P:{} C:{} F:{} per 100g",
            self.name, self.id, self.calories, self.protein, self.carbs, self.fat
        )
    }

    /// Canonical key for name lookups (lowercase name).
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }
}
