use serde::Serialize;

/// Utilization of one monthly limit.
///
/// `percentage` is capped at 100 for progress bars; `is_near_limit` compares
/// the uncapped ratio against the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub spend: f64,
    pub limit: f64,
    pub percentage: f64,
    pub is_over_budget: bool,
    pub is_near_limit: bool,
    pub remaining: f64,
}

impl BudgetStatus {
    /// Over budget wins over the near-limit warning.
    pub fn label(&self) -> &'static str {
        if self.is_over_budget {
            "over budget"
        } else if self.is_near_limit {
            "near limit"
        } else {
            "on track"
        }
    }
}

/// Classifies `spend` against `limit`.
///
/// A non-positive limit is treated as fully used as soon as anything is spent.
pub fn budget_status(spend: f64, limit: f64, alert_threshold: f64) -> BudgetStatus {
    let raw_percentage = if limit > 0.0 {
        spend / limit * 100.0
    } else if spend > 0.0 {
        100.0
    } else {
        0.0
    };
    BudgetStatus {
        spend,
        limit,
        percentage: raw_percentage.min(100.0),
        is_over_budget: spend > limit,
        is_near_limit: raw_percentage >= alert_threshold,
        remaining: (limit - spend).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overspend_is_capped_and_flagged() {
        let status = budget_status(600.0, 500.0, 80.0);
        assert_eq!(status.percentage, 100.0);
        assert!(status.is_over_budget);
        assert!(status.is_near_limit);
        assert_eq!(status.remaining, 0.0);
        assert_eq!(status.label(), "over budget");
    }

    #[test]
    fn near_limit_below_budget() {
        let status = budget_status(850.0, 1000.0, 80.0);
        assert_eq!(status.percentage, 85.0);
        assert!(status.is_near_limit);
        assert!(!status.is_over_budget);
        assert_eq!(status.remaining, 150.0);
        assert_eq!(status.label(), "near limit");
    }

    #[test]
    fn spend_exactly_at_limit_is_not_over() {
        let status = budget_status(500.0, 500.0, 80.0);
        assert!(!status.is_over_budget);
        assert_eq!(status.percentage, 100.0);
    }

    #[test]
    fn zero_limit_does_not_divide() {
        assert_eq!(budget_status(0.0, 0.0, 80.0).percentage, 0.0);
        assert_eq!(budget_status(25.0, 0.0, 80.0).percentage, 100.0);
        assert!(budget_status(25.0, 0.0, 80.0).is_over_budget);
    }
}
