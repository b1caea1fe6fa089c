use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::numeric::lenient_f64;

/// One of the four fixed meal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snacks,
    Dinner,
}

impl MealSlot {
    /// All slots in display order.
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snacks,
        MealSlot::Dinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Snacks => "snacks",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Snacks => "Snacks",
            MealSlot::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "snacks" | "snack" => Ok(MealSlot::Snacks),
            "dinner" => Ok(MealSlot::Dinner),
            _ => Err(PlannerError::UnknownSlot(s.to_string())),
        }
    }
}

/// A food reference and its amount in grams, placed in a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    #[serde(rename = "foodId")]
    pub food_id: String,

    #[serde(deserialize_with = "lenient_f64")]
    pub weight: f64,
}

impl MealEntry {
    pub fn new(food_id: impl Into<String>, weight: f64) -> Self {
        Self {
            food_id: food_id.into(),
            weight,
        }
    }
}

/// The four meal slots with their ordered entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meals {
    pub breakfast: Vec<MealEntry>,
    pub lunch: Vec<MealEntry>,
    pub snacks: Vec<MealEntry>,
    pub dinner: Vec<MealEntry>,
}

impl Meals {
    pub fn slot(&self, slot: MealSlot) -> &[MealEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Snacks => &self.snacks,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<MealEntry> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Snacks => &mut self.snacks,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    /// Iterate slots in display order with their entries.
    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &[MealEntry])> {
        MealSlot::ALL.into_iter().map(move |s| (s, self.slot(s)))
    }

    /// Number of entries across all slots.
    pub fn entry_count(&self) -> usize {
        MealSlot::ALL.iter().map(|s| self.slot(*s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    pub fn clear(&mut self) {
        for slot in MealSlot::ALL {
            self.slot_mut(slot).clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_parsing_case_insensitive() {
        assert_eq!("Breakfast".parse::<MealSlot>().unwrap(), MealSlot::Breakfast);
        assert_eq!(" DINNER ".parse::<MealSlot>().unwrap(), MealSlot::Dinner);
        assert_eq!("snack".parse::<MealSlot>().unwrap(), MealSlot::Snacks);
        assert!(matches!(
            "brunch".parse::<MealSlot>(),
            Err(PlannerError::UnknownSlot(_))
        ));
    }

    #[test]
    fn test_meals_layout_uses_slot_keys() {
        let mut meals = Meals::default();
        meals.lunch.push(MealEntry::new("rice", 150.0));

        let value = serde_json::to_value(&meals).unwrap();
        assert_eq!(value["lunch"][0]["foodId"], "rice");
        assert_eq!(value["lunch"][0]["weight"], 150.0);
        assert!(value["breakfast"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_missing_slot_keys_default_to_empty() {
        let meals: Meals =
            serde_json::from_str(r#"{"dinner": [{"foodId": "salmon", "weight": "200"}]}"#)
                .unwrap();
        assert!(meals.breakfast.is_empty());
        assert_eq!(meals.dinner, vec![MealEntry::new("salmon", 200.0)]);
        assert_eq!(meals.entry_count(), 1);
    }
}
