use std::collections::HashMap;

pub mod budget;
pub mod category;
pub mod deal;
pub mod expense;
pub mod system;
pub mod views;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(deal::definitions());
    commands.extend(expense::definitions());
    commands.extend(category::definitions());
    commands.extend(budget::definitions());
    commands.extend(views::definitions());
    commands.extend(system::definitions());
    commands
}

/// Positional arguments plus `--flag value` pairs.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    pub flags: HashMap<&'a str, &'a str>,
}

impl<'a> ParsedArgs<'a> {
    pub(crate) fn parse(args: &[&'a str]) -> Result<Self, CommandError> {
        let mut parsed = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.strip_prefix("--") {
                Some(flag) => {
                    let value = iter.next().ok_or_else(|| {
                        CommandError::InvalidArguments(format!("flag `--{flag}` needs a value"))
                    })?;
                    parsed.flags.insert(flag, value);
                }
                None => parsed.positional.push(arg),
            }
        }
        Ok(parsed)
    }

    pub(crate) fn flag(&self, name: &str) -> Option<&'a str> {
        self.flags.get(name).copied()
    }
}

pub(crate) fn parse_amount(raw: &str, what: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("{what} must be a number")))
}
