use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{DealVaultError, ValidationErrors};

/// Colour scheme preference for presentation layers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DealVaultError;

    /// Accepts only the exact stored values `light` and `dark`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("theme", "Invalid theme. Must be \"light\" or \"dark\".");
                Err(DealVaultError::ValidationFailed(errors))
            }
        }
    }
}
