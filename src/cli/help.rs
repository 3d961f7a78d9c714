use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::ui::style;

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Commands");
    let entries = registry.list();
    let width = entries.iter().map(|entry| entry.name.len()).max().unwrap_or(0);
    let style = style();
    for entry in entries {
        let name = format!("{:<width$}", entry.name);
        println!("  {}  {}", style.highlight(&name), entry.description);
    }
    output::hint("Type `help <command>` for usage.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(entry.name);
    println!("  {}", entry.description);
    for line in entry.usage.lines() {
        println!("  usage: {line}");
    }
}
