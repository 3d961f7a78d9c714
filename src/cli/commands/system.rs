use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::{help, output};
use crate::domain::Theme;
use crate::storage::{load_snapshot_from_path, save_snapshot_to_path};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "theme",
            "Show or change the light/dark preference",
            "theme [show|light|dark|toggle|clear]",
            cmd_theme,
        ),
        CommandEntry::new(
            "save",
            "Write every record to a JSON snapshot",
            "save [path]",
            cmd_save,
        ),
        CommandEntry::new(
            "load",
            "Replace every record with a JSON snapshot",
            "load [path]",
            cmd_load,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_theme(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let theme = match args.first().copied() {
        None | Some("show") => context.themes.current(),
        Some("toggle") => context.themes.toggle(),
        Some("clear") => context.themes.clear(),
        Some(raw) => {
            let theme = raw.to_ascii_lowercase().parse::<Theme>().map_err(|_| {
                CommandError::InvalidArguments(format!(
                    "unknown theme `{raw}` (use light or dark)"
                ))
            })?;
            context.themes.set(theme)
        }
    };
    output::info(format!("Theme: {theme}"));
    Ok(())
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = context.snapshot_path(args.first())?;
    save_snapshot_to_path(&context.store.snapshot(), &path)?;
    output::success(format!("Saved snapshot to {}", path.display()));
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = context.snapshot_path(args.first())?;
    let snapshot = load_snapshot_from_path(&path)?;
    let summary = format!(
        "{} deals, {} expenses, {} categories",
        snapshot.deals.len(),
        snapshot.expenses.len(),
        snapshot.categories.len()
    );
    context.store.replace(snapshot);
    output::success(format!("Loaded {summary} from {}", path.display()));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(meta.summary());
    output::two_column(&[
        ("Version", meta.version.to_string()),
        ("Build hash", format!("{} ({})", meta.git_hash, meta.git_status)),
        ("Built at", meta.timestamp.to_string()),
        ("Target", meta.target.to_string()),
        ("Profile", meta.profile.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ]);
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first() {
        Some(name) => match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        },
        None => help::print_overview(&context.registry),
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
