//! Shell state, dispatch and the error types shared by command handlers.

use std::{env, io, path::PathBuf, sync::Arc};

use chrono::{NaiveDate, NaiveTime};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use uuid::Uuid;

use crate::calendar::CalendarMonth;
use crate::cli::{commands, output, registry::CommandRegistry};
use crate::config::{Config, ConfigManager};
use crate::core::services::{EnvColorScheme, ThemeService};
use crate::core::time::{Clock, ManualClock, SystemClock};
use crate::currency::MoneyFormat;
use crate::domain::Identifiable;
use crate::errors::DealVaultError;
use crate::storage::{load_snapshot_from_path, JsonPreferenceStore};
use crate::store::Store;

/// Pins "today" for scripted sessions, e.g. `DEALVAULT_TODAY=2024-01-20`.
pub const TODAY_ENV: &str = "DEALVAULT_TODAY";

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] DealVaultError),
    #[error("readline failure: {0}")]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] DealVaultError),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub fn usage(usage: &str) -> Self {
        CommandError::InvalidArguments(format!("usage: {usage}"))
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: Store,
    pub themes: ThemeService,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub money: MoneyFormat,
    /// Month shown by the `calendar` command.
    pub calendar: CalendarMonth,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let clock = session_clock();
        let store = initial_store(&config, clock)?;
        let themes = ThemeService::new(
            Arc::new(JsonPreferenceStore::in_dir(config_manager.base_dir())),
            Arc::new(EnvColorScheme),
        );
        let calendar = CalendarMonth::from_date(store.today());

        Ok(Self {
            mode,
            registry: CommandRegistry::with_entries(commands::all_definitions()),
            money: config.money_format(),
            store,
            themes,
            config,
            config_manager,
            calendar,
            last_command: None,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        format!("dealvault [{} deals]> ", self.store.deals().len())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    /// Prints a failed command and keeps the loop alive.
    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(DealVaultError::ValidationFailed(errors)) => {
                output::error("Please fix the following fields:");
                for (field, message) in errors.fields() {
                    println!("  - {field}: {message}");
                }
            }
            CommandError::Core(other) => output::error(other),
        }
    }

    pub fn snapshot_path(&self, arg: Option<&&str>) -> Result<PathBuf, CommandError> {
        match arg {
            Some(path) => Ok(PathBuf::from(path)),
            None => self.config.snapshot_path.clone().ok_or_else(|| {
                CommandError::InvalidArguments(
                    "no path given and no default snapshot path configured".into(),
                )
            }),
        }
    }
}

fn session_clock() -> Arc<dyn Clock> {
    let pinned = env::var(TODAY_ENV)
        .ok()
        .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok());
    match pinned {
        Some(date) => Arc::new(ManualClock::new(
            date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN))
                .and_utc(),
        )),
        None => Arc::new(SystemClock),
    }
}

fn initial_store(config: &Config, clock: Arc<dyn Clock>) -> Result<Store, DealVaultError> {
    if let Some(path) = config.snapshot_path.as_ref().filter(|path| path.exists()) {
        let snapshot = load_snapshot_from_path(path)?;
        return Ok(Store::from_snapshot(snapshot, clock));
    }
    if config.seed_demo_data {
        Store::seeded(clock)
    } else {
        Ok(Store::new(clock))
    }
}

/// First eight hex digits, as shown in listings.
pub fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(8);
    short
}

/// Resolves a full id or a unique hex prefix of one.
pub fn resolve_id<'a, T, I>(records: I, input: &str) -> Result<Uuid, CommandError>
where
    T: Identifiable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }
    let needle = input.trim().to_ascii_lowercase().replace('-', "");
    if needle.is_empty() {
        return Err(CommandError::InvalidArguments("an id is required".into()));
    }
    let matches: Vec<Uuid> = records
        .into_iter()
        .map(Identifiable::id)
        .filter(|id| id.simple().to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CommandError::InvalidArguments(format!(
            "no record matches id `{input}`"
        ))),
        _ => Err(CommandError::InvalidArguments(format!(
            "id `{input}` is ambiguous"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::demo_snapshot;

    #[test]
    fn resolves_unique_prefixes() {
        let snapshot = demo_snapshot().unwrap();
        let id = resolve_id(&snapshot.deals, "d1000003").unwrap();
        assert_eq!(short_id(id), "d1000003");
        assert_eq!(resolve_id(&snapshot.deals, &id.to_string()).unwrap(), id);
        assert!(matches!(
            resolve_id(&snapshot.deals, "d10000"),
            Err(CommandError::InvalidArguments(message)) if message.contains("ambiguous")
        ));
        assert!(resolve_id(&snapshot.deals, "ffff").is_err());
    }
}
