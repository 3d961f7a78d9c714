use uuid::Uuid;

use super::{date, empty_store, seeded_store};
use crate::calendar::CalendarMonth;
use crate::core::services::{BudgetService, ExpenseService};
use crate::domain::{CategoryPatch, LimitSettings, NewCategory, NewExpense};
use crate::errors::DealVaultError;

#[test]
fn set_budget_limit_upserts_by_category() {
    let (mut store, _) = empty_store();
    let category = BudgetService::create_category(&mut store, NewCategory::new("Software", "#6366f1")).unwrap();

    let first = BudgetService::set_budget_limit(
        &mut store,
        category.id,
        LimitSettings::with_default_threshold(300.0),
    )
    .unwrap();
    assert_eq!(first.alert_threshold, 80.0);

    let second = BudgetService::set_budget_limit(&mut store, category.id, LimitSettings::new(450.0, 90.0)).unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.monthly_limit, 450.0);
    assert!(second.updated_at.is_some());
    assert_eq!(BudgetService::budget_limits(&store).len(), 1);
}

#[test]
fn invalid_limit_settings_are_rejected() {
    let (mut store, _) = empty_store();
    let err = BudgetService::set_budget_limit(&mut store, Uuid::new_v4(), LimitSettings::new(0.0, 80.0))
        .unwrap_err();
    assert!(matches!(err, DealVaultError::ValidationFailed(_)));
    assert!(BudgetService::budget_limits(&store).is_empty());
}

#[test]
fn delete_budget_limit_requires_existing_limit() {
    let store_category = Uuid::parse_str("c1000004-0000-4000-8000-000000000004").unwrap();
    let mut store = seeded_store();
    let err = BudgetService::delete_budget_limit(&mut store, store_category).unwrap_err();
    assert!(err.is_not_found());

    let software = Uuid::parse_str("c1000001-0000-4000-8000-000000000001").unwrap();
    let removed = BudgetService::delete_budget_limit(&mut store, software).unwrap();
    assert_eq!(removed.category_id, software);
    assert!(BudgetService::limit_for_category(&store, software).is_none());
}

#[test]
fn budget_limits_are_addressable_by_record_id() {
    let mut store = seeded_store();
    let software = Uuid::parse_str("c1000001-0000-4000-8000-000000000001").unwrap();
    let limit = BudgetService::limit_for_category(&store, software).unwrap();

    assert_eq!(BudgetService::budget_limit(&store, limit.id).unwrap(), limit);
    let updated = BudgetService::update_budget_limit(&mut store, limit.id, LimitSettings::new(350.0, 70.0)).unwrap();
    assert_eq!(updated.id, limit.id);
    assert_eq!(updated.category_id, software);
    assert_eq!(updated.monthly_limit, 350.0);
    assert_eq!(updated.alert_threshold, 70.0);

    let err = BudgetService::update_budget_limit(&mut store, limit.id, LimitSettings::new(-1.0, 70.0)).unwrap_err();
    assert!(matches!(err, DealVaultError::ValidationFailed(_)));
    assert_eq!(BudgetService::budget_limit(&store, limit.id).unwrap().monthly_limit, 350.0);
}

#[test]
fn unknown_budget_limit_ids_are_not_found() {
    let mut store = seeded_store();
    let missing = Uuid::new_v4();
    assert!(BudgetService::budget_limit(&store, missing).unwrap_err().is_not_found());
    let err = BudgetService::update_budget_limit(&mut store, missing, LimitSettings::new(100.0, 80.0)).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn deleting_category_cascades_limits_but_not_expenses() {
    let (mut store, _) = empty_store();
    let category = BudgetService::create_category(&mut store, NewCategory::new("Hosting", "#f59e0b")).unwrap();
    BudgetService::set_budget_limit(&mut store, category.id, LimitSettings::new(100.0, 90.0)).unwrap();
    let expense = ExpenseService::create(
        &mut store,
        NewExpense::new("VPS", 20.0, category.id, date(2024, 1, 3)),
    )
    .unwrap();

    BudgetService::delete_category(&mut store, category.id).unwrap();

    assert!(BudgetService::budget_limits(&store).is_empty());
    let orphan = ExpenseService::get_by_id(&store, expense.id).unwrap();
    assert_eq!(orphan.category_id, category.id);
    assert!(BudgetService::category_for_expense(&store, &orphan).is_none());
}

#[test]
fn update_category_keeps_unset_fields() {
    let (mut store, _) = empty_store();
    let category = BudgetService::create_category(&mut store, NewCategory::new("Education", "#8b5cf6")).unwrap();
    let updated = BudgetService::update_category(
        &mut store,
        category.id,
        CategoryPatch {
            name: Some("Learning".into()),
            ..CategoryPatch::default()
        },
    )
    .unwrap();
    assert_eq!(updated.name, "Learning");
    assert_eq!(updated.color, "#8b5cf6");
}

#[test]
fn blank_category_names_are_rejected() {
    let (mut store, _) = empty_store();
    let err = BudgetService::create_category(&mut store, NewCategory::new("  ", "#000")).unwrap_err();
    match err {
        DealVaultError::ValidationFailed(errors) => {
            assert_eq!(errors.get("name"), Some("Category name is required"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(BudgetService::categories(&store).is_empty());
}

#[test]
fn monthly_overview_matches_seed_figures() {
    let store = seeded_store();
    let overview = BudgetService::monthly_overview(&store, CalendarMonth::new(2024, 1).unwrap());

    assert_eq!(overview.lines.len(), 3);
    assert_eq!(overview.total_spend, 700.0);
    assert_eq!(overview.total_budget, 600.0);
    assert!((overview.overall_percentage - 700.0 / 600.0 * 100.0).abs() < 1e-9);

    let marketing = overview
        .lines
        .iter()
        .find(|line| line.category.name == "Marketing")
        .unwrap();
    assert_eq!(marketing.status.spend, 297.0);
    assert_eq!(marketing.status.percentage, 100.0);
    assert!(marketing.status.is_over_budget);

    let software = overview
        .lines
        .iter()
        .find(|line| line.category.name == "Software")
        .unwrap();
    assert_eq!(software.status.spend, 318.0);
    assert!(software.status.is_over_budget);

    let hosting = overview
        .lines
        .iter()
        .find(|line| line.category.name == "Hosting")
        .unwrap();
    assert_eq!(hosting.status.percentage, 85.0);
    assert!(!hosting.status.is_near_limit);
    assert_eq!(overview.lines_needing_attention().count(), 2);
}

#[test]
fn monthly_overview_without_limits_reports_zero_percentage() {
    let (store, _) = empty_store();
    let overview = BudgetService::monthly_overview(&store, CalendarMonth::new(2024, 1).unwrap());
    assert!(overview.lines.is_empty());
    assert_eq!(overview.overall_percentage, 0.0);
}
