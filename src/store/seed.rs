use std::sync::Arc;

use crate::core::time::Clock;
use crate::errors::Result;

use super::{Store, StoreSnapshot};

const SEED_JSON: &str = include_str!("../../data/seed.json");

/// Parses the bundled demo dataset.
pub fn demo_snapshot() -> Result<StoreSnapshot> {
    Ok(serde_json::from_str(SEED_JSON)?)
}

impl Store {
    /// Builds a store pre-populated with the bundled demo deals, categories,
    /// budget limits and expenses.
    pub fn seeded(clock: Arc<dyn Clock>) -> Result<Self> {
        let snapshot = demo_snapshot()?;
        tracing::info!(
            deals = snapshot.deals.len(),
            expenses = snapshot.expenses.len(),
            categories = snapshot.categories.len(),
            "loaded demo dataset"
        );
        Ok(Self::from_snapshot(snapshot, clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_dataset_parses() {
        let snapshot = demo_snapshot().expect("bundled seed is valid JSON");
        assert_eq!(snapshot.deals.len(), 6);
        assert_eq!(snapshot.categories.len(), 4);
        assert_eq!(snapshot.budget_limits.len(), 3);
        assert_eq!(snapshot.expenses.len(), 5);
        assert!(snapshot
            .deals
            .iter()
            .any(|deal| deal.name == "Canva Pro Lifetime"));
    }
}
