use super::seeded_store;
use crate::aggregate::MonthKey;
use crate::core::services::SummaryService;

#[test]
fn dashboard_uses_store_clock_for_current_month() {
    let store = seeded_store();
    let stats = SummaryService::dashboard(&store, 2);
    assert_eq!(stats.deal_count, 6);
    assert_eq!(stats.total_spent, 962.0);
    assert_eq!(stats.spent_this_month, 615.0);
    assert_eq!(stats.category_count, 4);
    assert!((stats.average_deal - 962.0 / 6.0).abs() < 1e-9);
    assert_eq!(stats.recent.len(), 2);
    assert_eq!(stats.recent[0].name, "Pabbly Connect");
}

#[test]
fn breakdown_orders_categories_by_spend() {
    let store = seeded_store();
    let breakdown = SummaryService::breakdown(&store);
    let keys: Vec<_> = breakdown.groups.iter().map(|group| group.key.as_str()).collect();
    assert_eq!(keys, vec!["Marketing", "Business", "Productivity", "Design Tools"]);
    assert_eq!(breakdown.total, 962.0);
    let shares: f64 = breakdown
        .groups
        .iter()
        .map(|group| group.share_of(breakdown.total))
        .sum();
    assert!((shares - 100.0).abs() < 1e-9);
}

#[test]
fn monthly_and_seller_totals() {
    let store = seeded_store();
    let months = SummaryService::spend_by_month(&store);
    assert_eq!(months.get(&MonthKey { year: 2024, month: 2 }), Some(&318.0));
    assert_eq!(months.keys().next().map(ToString::to_string).as_deref(), Some("2023 Dec"));
    let sellers = SummaryService::spend_by_seller(&store);
    assert_eq!(sellers.get("AppSumo"), Some(&395.0));
}
