use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::numeric::lenient_f64;

/// Daily nutrition targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    #[serde(deserialize_with = "lenient_f64")]
    pub calories: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub protein: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub carbs: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub fat: f64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calories: 2130.0,
            protein: 130.0,
            carbs: 284.0,
            fat: 61.0,
        }
    }
}

impl Goals {
    pub fn get(&self, field: GoalField) -> f64 {
        match field {
            GoalField::Calories => self.calories,
            GoalField::Protein => self.protein,
            GoalField::Carbs => self.carbs,
            GoalField::Fat => self.fat,
        }
    }

    pub fn set(&mut self, field: GoalField, value: f64) {
        let slot = match field {
            GoalField::Calories => &mut self.calories,
            GoalField::Protein => &mut self.protein,
            GoalField::Carbs => &mut self.carbs,
            GoalField::Fat => &mut self.fat,
        };
        *slot = value;
    }
}

/// One editable field of [`Goals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalField {
    Calories,
    Protein,
    Carbs,
    Fat,
}

impl GoalField {
    pub const ALL: [GoalField; 4] = [
        GoalField::Calories,
        GoalField::Protein,
        GoalField::Carbs,
        GoalField::Fat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GoalField::Calories => "Calories",
            GoalField::Protein => "Protein",
            GoalField::Carbs => "Carbs",
            GoalField::Fat => "Fat",
        }
    }

    /// Display unit suffix.
    pub fn unit(&self) -> &'static str {
        match self {
            GoalField::Calories => "",
            _ => "g",
        }
    }
}

impl fmt::Display for GoalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

impl FromStr for GoalField {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calories" | "kcal" => Ok(GoalField::Calories),
            "protein" => Ok(GoalField::Protein),
            "carbs" => Ok(GoalField::Carbs),
            "fat" => Ok(GoalField::Fat),
            _ => Err(PlannerError::UnknownGoalField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    #[serde(other)]
    Other,
}

impl FromStr for Gender {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            _ => Gender::Other,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Cut,
    Bulk,
    #[serde(other)]
    Maintain,
}

impl FromStr for GoalType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cut" => Ok(GoalType::Cut),
            "maintain" => Ok(GoalType::Maintain),
            "bulk" => Ok(GoalType::Bulk),
            _ => Err(PlannerError::InvalidInput(format!(
                "unknown goal type '{}' (expected cut, maintain or bulk)",
                s
            ))),
        }
    }
}

/// Body data used to derive goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Body weight in kg.
    #[serde(deserialize_with = "lenient_f64")]
    pub weight: f64,

    /// Height in cm.
    #[serde(deserialize_with = "lenient_f64")]
    pub height: f64,

    #[serde(deserialize_with = "lenient_f64")]
    pub age: f64,

    pub gender: Gender,

    /// Activity multiplier applied to the basal rate.
    #[serde(deserialize_with = "lenient_f64")]
    pub activity: f64,

    #[serde(rename = "goalType")]
    pub goal_type: GoalType,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            weight: 86.0,
            height: 172.0,
            age: 30.0,
            gender: Gender::Male,
            activity: 1.2,
            goal_type: GoalType::Cut,
        }
    }
}

/// A partial profile edit; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub age: Option<f64>,
    pub gender: Option<Gender>,
    pub activity: Option<f64>,
    pub goal_type: Option<GoalType>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProfileUpdate::default()
    }

    pub fn apply(&self, profile: &mut Profile) {
        if let Some(weight) = self.weight {
            profile.weight = weight;
        }
        if let Some(height) = self.height {
            profile.height = height;
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(gender) = self.gender {
            profile.gender = gender;
        }
        if let Some(activity) = self.activity {
            profile.activity = activity.max(1.0);
        }
        if let Some(goal_type) = self.goal_type {
            profile.goal_type = goal_type;
        }
    }
}
