use std::collections::HashMap;
use std::fs;
use std::path::Path;

use strsim::jaro_winkler;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::Food;

/// Minimum similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Read-only food reference data keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Foods in feed order.
    foods: Vec<Food>,

    /// Food id to position in `foods`.
    index: HashMap<String, usize>,
}

/// Outcome of resolving free text to a catalog food.
#[derive(Debug)]
pub enum FoodMatch<'a> {
    /// Exact id or case-insensitive name match.
    Exact(&'a Food),
    /// Fuzzy candidates, best first.
    Candidates(Vec<&'a Food>),
    NoMatch,
}

impl Catalog {
    /// Build a catalog, deduplicating by id (last occurrence wins, first position kept).
    pub fn new(foods: Vec<Food>) -> Self {
        let mut catalog = Self::default();
        for food in foods {
            match catalog.index.get(&food.id) {
                Some(&pos) => catalog.foods[pos] = food,
                None => {
                    catalog.index.insert(food.id.clone(), catalog.foods.len());
                    catalog.foods.push(food);
                }
            }
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&Food> {
        self.index.get(id).map(|&pos| &self.foods[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.foods.iter()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Get a food by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Food> {
        let key = name.trim().to_lowercase();
        self.foods.iter().find(|f| f.name_key() == key)
    }

    /// Foods whose name or id is similar to `query`, best first.
    pub fn search(&self, query: &str) -> Vec<&Food> {
        let query = query.trim().to_lowercase();
        let mut scored: Vec<(&Food, f64)> = self
            .foods
            .iter()
            .map(|f| {
                let score = if f.name_key().contains(&query) {
                    1.0
                } else {
                    jaro_winkler(&f.name_key(), &query).max(jaro_winkler(&f.id.to_lowercase(), &query))
                };
                (f, score)
            })
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(f, _)| f).collect()
    }

    /// Resolve user text to a food: exact id, then name, then fuzzy candidates.
    pub fn resolve(&self, query: &str) -> FoodMatch<'_> {
        if let Some(food) = self.get(query.trim()) {
            return FoodMatch::Exact(food);
        }
        if let Some(food) = self.find_by_name(query) {
            return FoodMatch::Exact(food);
        }

        let candidates = self.search(query);
        if candidates.is_empty() {
            FoodMatch::NoMatch
        } else {
            FoodMatch::Candidates(candidates)
        }
    }
}

/// Load the catalog feed from a JSON file.
///
/// Never fails: an unreadable or malformed feed yields an empty catalog, and
/// individual records that do not parse or validate are skipped.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Catalog {
    let path = path.as_ref();
    match read_feed(path) {
        Ok(foods) => {
            let catalog = Catalog::new(foods);
            info!(path = %path.display(), foods = catalog.len(), "Loaded food catalog");
            catalog
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load foods, using empty catalog");
            Catalog::default()
        }
    }
}

fn read_feed(path: &Path) -> Result<Vec<Food>> {
    let content = fs::read_to_string(path)?;
    let records: Vec<serde_json::Value> = serde_json::from_str(&content)?;

    let mut foods = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Food>(record) {
            Ok(food) if food.is_valid() => {
                debug!(food = %food.debug_string(), "catalog entry");
                foods.push(food);
            }
            Ok(food) => warn!(record = i, id = %food.id, "Skipping food with invalid nutrition"),
            Err(e) => warn!(record = i, error = %e, "Skipping malformed food record"),
        }
    }
    Ok(foods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn food(id: &str, name: &str, calories: f64) -> Food {
        Food {
            id: id.to_string(),
            name: name.to_string(),
            calories,
            protein: 1.0,
            carbs: 1.0,
            fat: 1.0,
        }
    }

    #[test]
    fn test_dedup_last_wins_first_position() {
        let catalog = Catalog::new(vec![
            food("apple", "Apple", 52.0),
            food("bread", "Bread", 265.0),
            food("apple", "Apple", 60.0),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("apple").unwrap().calories, 60.0);
        assert_eq!(catalog.iter().next().unwrap().id, "apple");
    }

    #[test]
    fn test_resolve_exact_then_fuzzy() {
        let catalog = Catalog::new(vec![
            food("chicken-breast", "Chicken Breast", 165.0),
            food("brown-rice", "Brown Rice", 111.0),
        ]);

        assert!(matches!(catalog.resolve("brown-rice"), FoodMatch::Exact(f) if f.id == "brown-rice"));
        assert!(matches!(catalog.resolve("chicken breast"), FoodMatch::Exact(f) if f.id == "chicken-breast"));

        match catalog.resolve("chiken") {
            FoodMatch::Candidates(c) => assert_eq!(c[0].id, "chicken-breast"),
            other => panic!("expected candidates, got {:?}", other),
        }
        assert!(matches!(catalog.resolve("zzzz"), FoodMatch::NoMatch));
    }

    #[test]
    fn test_load_skips_invalid_records() {
        let json = r#"[
            {"id": "egg", "name": "Egg", "calories": 143, "protein": 12.6, "carbs": 0.7, "fat": 9.5},
            {"id": "bad", "name": "Bad", "calories": -5, "protein": 0, "carbs": 0, "fat": 0},
            {"name": "No id"}
        ]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = load_catalog(file.path());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("egg").is_some());
    }

    #[test]
    fn test_load_failure_yields_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(load_catalog(file.path()).is_empty());

        assert!(load_catalog("/definitely/missing/foods.json").is_empty());
    }
}
