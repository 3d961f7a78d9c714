//! Light/dark preference with an OS-level fallback.

use std::{env, sync::Arc};

use crate::domain::Theme;
use crate::storage::PreferenceStore;

/// Key under which the theme is stored.
pub const THEME_KEY: &str = "dealvault-theme";

const COLOR_SCHEME_ENV: &str = "DEALVAULT_COLOR_SCHEME";
const COLORFGBG_ENV: &str = "COLORFGBG";

/// Reports the color scheme the operating environment prefers, if any.
pub trait ColorSchemeSource: Send + Sync {
    fn preferred(&self) -> Option<Theme>;
}

/// Reads `DEALVAULT_COLOR_SCHEME`, then the terminal `COLORFGBG` convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvColorScheme;

impl ColorSchemeSource for EnvColorScheme {
    fn preferred(&self) -> Option<Theme> {
        if let Ok(value) = env::var(COLOR_SCHEME_ENV) {
            if let Ok(theme) = value.trim().to_ascii_lowercase().parse() {
                return Some(theme);
            }
        }
        env::var(COLORFGBG_ENV)
            .ok()
            .and_then(|value| theme_from_colorfgbg(&value))
    }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); ANSI backgrounds 0-6
/// and 8 are dark.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(match background {
        0..=6 | 8 => Theme::Dark,
        _ => Theme::Light,
    })
}

/// Source with a fixed answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedColorScheme(pub Option<Theme>);

impl ColorSchemeSource for FixedColorScheme {
    fn preferred(&self) -> Option<Theme> {
        self.0
    }
}

/// Resolves and stores the UI theme. Storage failures are logged and never
/// returned; the service then answers from the last explicit choice.
pub struct ThemeService {
    preferences: Arc<dyn PreferenceStore>,
    system: Arc<dyn ColorSchemeSource>,
    /// Last theme passed to `set`, kept even when it could not be stored.
    chosen: Option<Theme>,
}

impl ThemeService {
    pub fn new(preferences: Arc<dyn PreferenceStore>, system: Arc<dyn ColorSchemeSource>) -> Self {
        Self {
            preferences,
            system,
            chosen: None,
        }
    }

    /// Stored theme when valid, otherwise this session's choice, otherwise
    /// the environment preference.
    pub fn current(&self) -> Theme {
        match self.preferences.get(THEME_KEY) {
            Ok(Some(raw)) => match raw.parse::<Theme>() {
                Ok(theme) => theme,
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring invalid stored theme");
                    self.fallback_theme()
                }
            },
            Ok(None) => self.fallback_theme(),
            Err(err) => {
                tracing::error!(error = %err, "failed to read theme preference");
                self.chosen.unwrap_or_default()
            }
        }
    }

    pub fn set(&mut self, theme: Theme) -> Theme {
        self.chosen = Some(theme);
        if let Err(err) = self.preferences.set(THEME_KEY, theme.as_str()) {
            tracing::error!(error = %err, %theme, "failed to store theme preference");
        }
        theme
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current().toggled();
        self.set(next)
    }

    /// Forgets the stored choice and returns the environment preference.
    pub fn clear(&mut self) -> Theme {
        if let Err(err) = self.preferences.remove(THEME_KEY) {
            tracing::error!(error = %err, "failed to clear theme preference");
        }
        self.chosen = None;
        self.fallback_theme()
    }

    fn fallback_theme(&self) -> Theme {
        self.chosen
            .or_else(|| self.system.preferred())
            .unwrap_or_default()
    }
}
