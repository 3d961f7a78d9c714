//! Line-oriented shell over the deal store: interactive via rustyline, or
//! scripted from stdin when `DEALVAULT_CLI_SCRIPT` is set.

pub mod commands;
pub mod core;
pub mod help;
pub mod output;
pub mod registry;
pub mod shell;
pub mod ui;

pub use shell::run_cli;
