use crate::calendar::CalendarMonth;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{style, Table, TableColumn, TableRenderer};
use crate::core::services::BudgetService;
use crate::currency::{format_currency, format_percentage};
use crate::domain::{LimitSettings, DEFAULT_ALERT_THRESHOLD};

use super::{category::find_category, parse_amount};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "budget",
        "Monthly limits and budget status per category",
        "budget show [YYYY-MM]\nbudget set <category> <monthly-limit> [alert-threshold]\nbudget clear <category>",
        cmd_budget,
    )]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => show(context, &[]),
        Some((&"show", rest)) => show(context, rest),
        Some((&"set", rest)) => set(context, rest),
        Some((&"clear", rest)) => clear(context, rest),
        Some((other, _)) => Err(CommandError::InvalidArguments(format!(
            "unknown budget action `{other}`"
        ))),
    }
}

fn show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let month = match args.first() {
        Some(raw) => raw.parse::<CalendarMonth>()?,
        None => CalendarMonth::from_date(context.store.today()),
    };
    let overview = BudgetService::monthly_overview(&context.store, month);
    let money = &context.money;

    output::section(format!("Budget for {}", month.label()));
    output::two_column(&[
        ("Spent", format_currency(overview.total_spend, money)),
        ("Budget", format_currency(overview.total_budget, money)),
        ("Used", format_percentage(overview.overall_percentage)),
    ]);

    if overview.lines.is_empty() {
        output::info("No budget limits set. Use `budget set <category> <limit>`.");
        return Ok(());
    }

    let mut table = Table::new(
        None,
        vec![
            TableColumn::new("Category", 16),
            TableColumn::numeric("Spent", 11),
            TableColumn::numeric("Limit", 11),
            TableColumn::numeric("Used", 7),
            TableColumn::numeric("Left", 11),
            TableColumn::new("Status", 12),
        ],
    );
    for line in &overview.lines {
        table.add_row(vec![
            line.category.name.clone(),
            format_currency(line.status.spend, money),
            format_currency(line.status.limit, money),
            format_percentage(line.status.percentage),
            format_currency(line.status.remaining, money),
            line.status.label().to_string(),
        ]);
    }
    TableRenderer::render(&table, &style());

    for line in overview.lines_needing_attention() {
        if line.status.is_over_budget {
            output::warning(format!(
                "{} is over budget by {}",
                line.category.name,
                format_currency(line.status.spend - line.status.limit, money)
            ));
        } else {
            output::warning(format!(
                "{} has reached {:.0}% of its limit",
                line.category.name, line.limit.alert_threshold
            ));
        }
    }
    Ok(())
}

fn set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(category), Some(limit)) = (args.first(), args.get(1)) else {
        return Err(CommandError::usage(
            "budget set <category> <monthly-limit> [alert-threshold]",
        ));
    };
    let category = find_category(context, category)?;
    let monthly_limit = parse_amount(limit, "monthly limit")?;
    let alert_threshold = match args.get(2) {
        Some(raw) => parse_amount(raw.trim_end_matches('%'), "alert threshold")?,
        None => DEFAULT_ALERT_THRESHOLD,
    };
    let limit = BudgetService::set_budget_limit(
        &mut context.store,
        category.id,
        LimitSettings::new(monthly_limit, alert_threshold),
    )?;
    output::success(format!(
        "{} limit set to {} (alert at {:.0}%)",
        category.name,
        format_currency(limit.monthly_limit, &context.money),
        limit.alert_threshold
    ));
    Ok(())
}

fn clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(category) = args.first() else {
        return Err(CommandError::usage("budget clear <category>"));
    };
    let category = find_category(context, category)?;
    BudgetService::delete_budget_limit(&mut context.store, category.id)?;
    output::success(format!("Removed the budget limit for {}", category.name));
    Ok(())
}
