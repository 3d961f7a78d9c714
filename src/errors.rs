use std::{collections::BTreeMap, fmt};

use thiserror::Error;

/// Record families managed by the store, used to label lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Deal,
    Expense,
    Category,
    BudgetLimit,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Deal => "Deal",
            RecordKind::Expense => "Expense",
            RecordKind::Category => "Category",
            RecordKind::BudgetLimit => "Budget limit",
        };
        f.write_str(label)
    }
}

/// Field-level messages collected while validating a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Returns `Ok(value)` when no field errors were recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(DealVaultError::ValidationFailed(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Unified error type for store, service and persistence layers.
#[derive(Debug, Error)]
pub enum DealVaultError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),
    #[error("Preference storage unavailable: {0}")]
    PersistenceUnavailable(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DealVaultError {
    pub fn not_found(kind: RecordKind, id: impl ToString) -> Self {
        DealVaultError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DealVaultError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DealVaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_keep_first_message_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("amount", "Valid amount is required");
        errors.add("amount", "ignored");
        errors.add("name", "Deal name is required");

        assert_eq!(errors.get("amount"), Some("Valid amount is required"));
        assert_eq!(
            errors.to_string(),
            "amount: Valid amount is required; name: Deal name is required"
        );
    }

    #[test]
    fn not_found_message_names_the_record_kind() {
        let err = DealVaultError::not_found(RecordKind::BudgetLimit, "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Budget limit not found: abc");
    }
}
