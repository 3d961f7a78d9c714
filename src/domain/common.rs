use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::RecordKind;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Entities carrying a monetary amount that can be summed.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// A record owned by a store collection.
///
/// `New` is the validated payload accepted by `create`; `Patch` is the typed
/// partial update applied field by field by `update`.
pub trait Record: Clone + Identifiable {
    type New;
    type Patch;

    const KIND: RecordKind;

    fn build(id: Uuid, data: Self::New, now: DateTime<Utc>) -> Self;

    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}

/// Overwrites `target` when the patch carries a value.
pub(crate) fn merge<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
