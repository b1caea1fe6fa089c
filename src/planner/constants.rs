//! Constants for nutrition scaling and goal derivation.

// --- Entries ---

/// Nutrition values in the catalog are given per this many grams.
pub const REFERENCE_GRAMS: f64 = 100.0;

/// Amount used when a food is dropped into a slot.
pub const DEFAULT_ENTRY_GRAMS: f64 = 100.0;

// --- Basal rate (Mifflin-St Jeor) ---

pub const BMR_WEIGHT_FACTOR: f64 = 10.0;
pub const BMR_HEIGHT_FACTOR: f64 = 6.25;
pub const BMR_AGE_FACTOR: f64 = 5.0;
pub const BMR_MALE_OFFSET: f64 = 5.0;
pub const BMR_OTHER_OFFSET: f64 = -161.0;

// --- Goal adjustments (kcal/day) ---

pub const CUT_ADJUSTMENT: f64 = -500.0;
pub const BULK_ADJUSTMENT: f64 = 300.0;

// --- Macro split (grams per kg of body weight) ---

pub const PROTEIN_G_PER_KG: f64 = 2.0;
pub const FAT_G_PER_KG: f64 = 0.8;

// --- Energy density (kcal per gram) ---

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

// --- Progress display ---

/// Progress bars are capped at this percentage.
pub const PROGRESS_CAP_PERCENT: f64 = 100.0;
