//! Dashboard statistics and deal breakdowns.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::aggregate::{
    average_value, category_breakdown, group_by_month, group_by_seller, total_spend, CategoryGroup,
    MonthKey,
};
use crate::calendar::CalendarMonth;
use crate::domain::Deal;
use crate::store::Store;

use super::DealService;

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub deal_count: usize,
    pub total_spent: f64,
    pub spent_this_month: f64,
    pub category_count: usize,
    pub average_deal: f64,
    pub recent: Vec<Deal>,
}

/// Category groups of every deal plus the grand total they share.
#[derive(Debug, Clone, PartialEq)]
pub struct DealBreakdown {
    pub total: f64,
    pub groups: Vec<CategoryGroup<Deal>>,
}

pub struct SummaryService;

impl SummaryService {
    /// Aggregates the deal collection relative to the store clock's month.
    pub fn dashboard(store: &Store, recent_limit: usize) -> DashboardStats {
        let deals = DealService::get_all(store);
        let this_month = CalendarMonth::from_date(store.today());
        let monthly: Vec<Deal> = deals
            .iter()
            .filter(|deal| this_month.contains(deal.purchase_date))
            .cloned()
            .collect();
        let categories: BTreeSet<&str> = deals.iter().map(|deal| deal.category.as_str()).collect();

        DashboardStats {
            deal_count: deals.len(),
            total_spent: total_spend(&deals),
            spent_this_month: total_spend(&monthly),
            category_count: categories.len(),
            average_deal: average_value(&deals),
            recent: DealService::recent(store, recent_limit),
        }
    }

    pub fn breakdown(store: &Store) -> DealBreakdown {
        let deals = DealService::get_all(store);
        DealBreakdown {
            total: total_spend(&deals),
            groups: category_breakdown(&deals),
        }
    }

    pub fn spend_by_month(store: &Store) -> BTreeMap<MonthKey, f64> {
        group_by_month(&DealService::get_all(store), |deal| deal.purchase_date)
    }

    pub fn spend_by_seller(store: &Store) -> BTreeMap<String, f64> {
        group_by_seller(&DealService::get_all(store))
    }
}
