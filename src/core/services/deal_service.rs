//! CRUD and list queries for lifetime deals.

use uuid::Uuid;

use crate::domain::{Deal, DealPatch, NewDeal};
use crate::errors::{DealVaultError, Result, ValidationErrors};
use crate::query::DealQuery;
use crate::store::Store;

pub struct DealService;

impl DealService {
    /// Returns independent copies of every deal in insertion order.
    pub fn get_all(store: &Store) -> Vec<Deal> {
        store.deals.all()
    }

    pub fn get_by_id(store: &Store, id: Uuid) -> Result<Deal> {
        store.deals.get(id)
    }

    pub fn create(store: &mut Store, data: NewDeal) -> Result<Deal> {
        check_amount(data.amount)?;
        let now = store.now();
        let deal = store.deals.insert(data, now);
        tracing::info!(id = %deal.id, name = %deal.name, "deal recorded");
        Ok(deal)
    }

    /// Merges `patch` into the stored deal; unset fields are kept.
    pub fn update(store: &mut Store, id: Uuid, patch: DealPatch) -> Result<Deal> {
        if let Some(amount) = patch.amount {
            check_amount(amount)?;
        }
        let now = store.now();
        store.deals.update(id, patch, now)
    }

    pub fn delete(store: &mut Store, id: Uuid) -> Result<Deal> {
        let removed = store.deals.remove(id)?;
        tracing::info!(id = %removed.id, "deal deleted");
        Ok(removed)
    }

    pub fn search(store: &Store, query: &DealQuery) -> Vec<Deal> {
        let deals: Vec<Deal> = store.deals.iter().cloned().collect();
        query.apply(&deals)
    }

    /// The `limit` most recent purchases, newest first.
    pub fn recent(store: &Store, limit: usize) -> Vec<Deal> {
        let mut deals = Self::search(store, &DealQuery::for_deals());
        deals.truncate(limit);
        deals
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount >= 0.0 {
        return Ok(());
    }
    let mut errors = ValidationErrors::new();
    errors.add("amount", "Valid amount is required");
    Err(DealVaultError::ValidationFailed(errors))
}
