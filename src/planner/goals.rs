use crate::models::{Gender, GoalType, Goals, Profile};
use crate::planner::calculations::round_half_up;
use crate::planner::constants::*;

/// Basal metabolic rate (kcal/day).
pub fn basal_rate(profile: &Profile) -> f64 {
    let base = BMR_WEIGHT_FACTOR * profile.weight + BMR_HEIGHT_FACTOR * profile.height
        - BMR_AGE_FACTOR * profile.age;
    match profile.gender {
        Gender::Male => base + BMR_MALE_OFFSET,
        Gender::Other => base + BMR_OTHER_OFFSET,
    }
}

/// Total daily energy expenditure (kcal/day).
pub fn daily_expenditure(profile: &Profile) -> f64 {
    basal_rate(profile) * profile.activity
}

/// Derive daily targets from a profile.
///
/// Protein and fat are fixed per kg of body weight; carbs take whatever
/// calories remain (never negative). Pure: the same profile always gives the
/// same goals.
pub fn derive_goals(profile: &Profile) -> Goals {
    let adjustment = match profile.goal_type {
        GoalType::Cut => CUT_ADJUSTMENT,
        GoalType::Maintain => 0.0,
        GoalType::Bulk => BULK_ADJUSTMENT,
    };
    let calories = round_half_up(daily_expenditure(profile) + adjustment);

    let protein = round_half_up(profile.weight * PROTEIN_G_PER_KG);
    let fat = round_half_up(profile.weight * FAT_G_PER_KG);

    let remaining = (calories - protein * KCAL_PER_G_PROTEIN - fat * KCAL_PER_G_FAT).max(0.0);
    let carbs = round_half_up(remaining / KCAL_PER_G_CARBS);

    Goals {
        calories,
        protein,
        carbs,
        fat,
    }
}
