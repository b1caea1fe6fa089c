use meal_planner_rs::error::PlannerError;
use meal_planner_rs::models::{GoalField, MealSlot, ViewMode};
use meal_planner_rs::planner::Planner;
use meal_planner_rs::state::{
    CURRENT_PLAN_KEY, FileStorage, MemoryStorage, Overwrite, PersistenceGateway, SAVED_PLANS_KEY,
    Storage, UpsertOutcome,
};
use meal_planner_rs::Plan;

#[test]
fn test_current_plan_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut planner = Planner::new(FileStorage::open(dir.path()).unwrap());
        planner.add_entry(MealSlot::Breakfast, "oats", 80.0);
        planner.set_goal(GoalField::Protein, 150.0);
    }

    let planner = Planner::new(FileStorage::open(dir.path()).unwrap());
    assert_eq!(planner.plan().meals.breakfast[0].food_id, "oats");
    assert_eq!(planner.plan().meals.breakfast[0].weight, 80.0);
    assert_eq!(planner.plan().goals.protein, 150.0);
}

#[test]
fn test_missing_or_corrupt_current_plan_loads_defaults() {
    let mut storage = MemoryStorage::new();
    storage.set(CURRENT_PLAN_KEY, "{not json").unwrap();

    let mut gateway = PersistenceGateway::new(storage);
    assert_eq!(gateway.load_current(), Plan::default());
    assert!(gateway.list_saved().is_empty());
}

#[test]
fn test_partial_current_plan_keeps_other_defaults() {
    let mut storage = MemoryStorage::new();
    storage
        .set(
            CURRENT_PLAN_KEY,
            r#"{"meals":{"lunch":[{"foodId":"rice","weight":"150"}]},"goals":{"calories":1800}}"#,
        )
        .unwrap();

    let mut gateway = PersistenceGateway::new(storage);
    let plan = gateway.load_current();
    assert_eq!(plan.meals.lunch[0].weight, 150.0);
    assert!(plan.meals.breakfast.is_empty());
    assert_eq!(plan.goals.calories, 1800.0);
    assert_eq!(plan.goals.protein, 130.0);
    assert_eq!(plan.profile.weight, 86.0);
}

#[test]
fn test_overwrite_needs_confirmation() {
    let mut gateway = PersistenceGateway::new(MemoryStorage::new());
    let mut plan = Plan::default();

    let first = gateway
        .upsert_saved("Week 1", &plan, Overwrite::NotConfirmed)
        .unwrap();
    assert_eq!(first, UpsertOutcome::Inserted);

    plan.goals.calories = 1900.0;
    let refused = gateway
        .upsert_saved("Week 1", &plan, Overwrite::NotConfirmed)
        .unwrap();
    assert_eq!(refused, UpsertOutcome::ConfirmationRequired);
    assert_eq!(gateway.open_saved("Week 1").unwrap().goals.calories, 2130.0);

    let replaced = gateway
        .upsert_saved("Week 1", &plan, Overwrite::Confirmed)
        .unwrap();
    assert_eq!(replaced, UpsertOutcome::Replaced);

    let saved = gateway.list_saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].plan.goals.calories, 1900.0);
}

#[test]
fn test_replace_keeps_position() {
    let mut gateway = PersistenceGateway::new(MemoryStorage::new());
    for name in ["A", "B", "C"] {
        gateway
            .upsert_saved(name, &Plan::default(), Overwrite::NotConfirmed)
            .unwrap();
    }
    gateway
        .upsert_saved("B", &Plan::default(), Overwrite::Confirmed)
        .unwrap();

    let names: Vec<_> = gateway.list_saved().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn test_empty_name_is_rejected() {
    let mut gateway = PersistenceGateway::new(MemoryStorage::new());
    let result = gateway.upsert_saved("   ", &Plan::default(), Overwrite::Confirmed);
    assert!(matches!(result, Err(PlannerError::EmptyPlanName)));
    assert!(gateway.list_saved().is_empty());
}

#[test]
fn test_delete_removes_exactly_one() {
    let mut gateway = PersistenceGateway::new(MemoryStorage::new());
    gateway
        .upsert_saved("Keep", &Plan::default(), Overwrite::NotConfirmed)
        .unwrap();
    gateway
        .upsert_saved("Drop", &Plan::default(), Overwrite::NotConfirmed)
        .unwrap();

    assert!(!gateway.delete_saved("Nope").unwrap());
    assert_eq!(gateway.list_saved().len(), 2);

    assert!(gateway.delete_saved("Drop").unwrap());
    let saved = gateway.list_saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "Keep");
}

#[test]
fn test_isolated_edits_never_touch_current_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut planner = Planner::new(FileStorage::open(dir.path()).unwrap());
    planner.add_entry(MealSlot::Lunch, "rice", 100.0);
    planner
        .save_current_plan("Lunchy", Overwrite::NotConfirmed)
        .unwrap();

    planner.open_saved_plan("Lunchy").unwrap();
    planner.add_entry(MealSlot::Dinner, "salmon", 180.0);
    planner.reset();

    let mut storage = FileStorage::open(dir.path()).unwrap();
    let raw = storage.get(CURRENT_PLAN_KEY).unwrap().unwrap();
    let current: Plan = serde_json::from_str(&raw).unwrap();
    assert_eq!(current.meals.lunch.len(), 1);
    assert!(current.meals.dinner.is_empty());

    // The saved copy is untouched until saved again.
    let reopened = Planner::new(storage);
    assert_eq!(reopened.saved_plans()[0].plan.meals.lunch.len(), 1);
}

#[test]
fn test_open_main_reloads_current_plan() {
    let mut planner = Planner::new(MemoryStorage::new());
    planner.add_entry(MealSlot::Snacks, "apple", 150.0);
    planner
        .save_current_plan("Snack day", Overwrite::NotConfirmed)
        .unwrap();
    planner.open_saved_plan("Snack day").unwrap();
    planner.reset();
    assert!(planner.plan().meals.is_empty());

    planner.open_main();
    assert_eq!(planner.view(), &ViewMode::Main);
    assert_eq!(planner.plan().meals.snacks.len(), 1);
}

#[test]
fn test_open_unknown_plan_keeps_session() {
    let mut planner = Planner::new(MemoryStorage::new());
    planner.add_entry(MealSlot::Breakfast, "eggs", 120.0);

    let err = planner.open_saved_plan("Missing").unwrap_err();
    assert!(matches!(err, PlannerError::PlanNotFound(name) if name == "Missing"));
    assert_eq!(planner.view(), &ViewMode::Main);
    assert_eq!(planner.plan().meals.breakfast.len(), 1);
}

#[test]
fn test_saved_plans_sync_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = Planner::new(FileStorage::open(dir.path()).unwrap());
    let mut second = Planner::new(FileStorage::open(dir.path()).unwrap());

    first
        .save_current_plan("Shared", Overwrite::NotConfirmed)
        .unwrap();
    assert!(second.saved_plans().is_empty());

    assert!(second.sync_external_changes());
    assert_eq!(second.saved_plans().len(), 1);
    assert_eq!(second.saved_plans()[0].name, "Shared");

    // Nothing new since the last sync.
    assert!(!second.sync_external_changes());

    assert!(second.delete_saved_plan("Shared").unwrap());
    assert!(first.sync_external_changes());
    assert!(first.saved_plans().is_empty());
}

#[test]
fn test_current_plan_edits_do_not_sync_saved_list() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = Planner::new(FileStorage::open(dir.path()).unwrap());
    let mut second = Planner::new(FileStorage::open(dir.path()).unwrap());

    first.add_entry(MealSlot::Lunch, "rice", 100.0);
    assert!(!second.sync_external_changes());
    assert!(second.plan().meals.lunch.is_empty());
}

#[test]
fn test_saved_plans_stored_as_json_array() {
    let mut gateway = PersistenceGateway::new(MemoryStorage::new());
    gateway
        .upsert_saved("Stored", &Plan::default(), Overwrite::NotConfirmed)
        .unwrap();

    let mut storage = gateway.into_inner();
    let raw = storage.get(SAVED_PLANS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert_eq!(first["name"], "Stored");
    assert!(first["date"].as_str().unwrap().ends_with('Z'));
    assert!(first["meals"].is_object());
    assert_eq!(first["goals"]["calories"], 2130.0);
    assert_eq!(first["profile"]["goalType"], "cut");
}

#[test]
fn test_save_of_loaded_plan_is_idempotent() {
    let mut gateway = PersistenceGateway::new(MemoryStorage::new());
    let mut plan = Plan::default();
    plan.meals.dinner.push(meal_planner_rs::MealEntry::new("salmon", 180.0));
    gateway.save_current(&plan, &ViewMode::Main).unwrap();

    let loaded = gateway.load_current();
    gateway.save_current(&loaded, &ViewMode::Main).unwrap();
    assert_eq!(gateway.load_current(), loaded);
    assert_eq!(loaded, plan);
}

#[test]
fn test_delete_keeps_remaining_order() {
    let mut gateway = PersistenceGateway::new(MemoryStorage::new());
    for name in ["A", "B", "C"] {
        gateway
            .upsert_saved(name, &Plan::default(), Overwrite::NotConfirmed)
            .unwrap();
    }

    assert!(gateway.delete_saved("B").unwrap());
    let names: Vec<_> = gateway.list_saved().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["A", "C"]);
}

#[test]
fn test_conflicting_save_from_other_session_is_seen() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = Planner::new(FileStorage::open(dir.path()).unwrap());
    let mut second = Planner::new(FileStorage::open(dir.path()).unwrap());

    second
        .save_current_plan("X", Overwrite::NotConfirmed)
        .unwrap();

    // first has not synced yet, so its view still lacks "X"
    let outcome = first
        .save_current_plan("X", Overwrite::NotConfirmed)
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::ConfirmationRequired);
    assert!(first.has_saved_plan("X"));

    let replaced = first.save_current_plan("X", Overwrite::Confirmed).unwrap();
    assert_eq!(replaced, UpsertOutcome::Replaced);
    assert_eq!(first.saved_plans().len(), 1);
}

#[test]
fn test_failed_lookups_keep_change_notice() {
    let dir = tempfile::tempdir().unwrap();
    let mut first = Planner::new(FileStorage::open(dir.path()).unwrap());
    let mut second = Planner::new(FileStorage::open(dir.path()).unwrap());

    second
        .save_current_plan("Shared", Overwrite::NotConfirmed)
        .unwrap();

    assert!(!first.delete_saved_plan("nope").unwrap());
    assert!(first.open_saved_plan("nope").is_err());

    assert!(first.sync_external_changes());
    assert_eq!(first.saved_plans().len(), 1);
    assert_eq!(first.saved_plans()[0].name, "Shared");
}
