use crate::aggregate::total_spend;
use crate::calendar::CalendarMonth;
use crate::cli::core::{resolve_id, short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{style, Table, TableColumn, TableRenderer};
use crate::core::services::{BudgetService, ExpenseService};
use crate::currency::{format_currency, format_date};
use crate::domain::ExpenseDraft;
use crate::query::ExpenseQuery;

use super::category::find_category;

const ADD_USAGE: &str = "expense add <description> <amount> <category> <YYYY-MM-DD> [seller] [notes]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Record spending against budget categories",
        "expense list [YYYY-MM]\nexpense add <description> <amount> <category> <YYYY-MM-DD> [seller] [notes]\nexpense remove <id>",
        cmd_expense,
    )]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => list(context, &[]),
        Some((&"list", rest)) => list(context, rest),
        Some((&"add", rest)) => add(context, rest),
        Some((&"remove", rest)) | Some((&"delete", rest)) => remove(context, rest),
        Some((other, _)) => Err(CommandError::InvalidArguments(format!(
            "unknown expense action `{other}`"
        ))),
    }
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let expenses = match args.first() {
        Some(raw) => ExpenseService::monthly(&context.store, raw.parse::<CalendarMonth>()?),
        None => ExpenseService::get_all(&context.store),
    };
    let expenses = ExpenseQuery::for_expenses().apply(&expenses);
    if expenses.is_empty() {
        output::info("No expenses recorded for this period.");
        return Ok(());
    }

    let mut table = Table::new(
        Some("Expenses"),
        vec![
            TableColumn::new("ID", 8),
            TableColumn::new("Description", 22),
            TableColumn::numeric("Amount", 11),
            TableColumn::new("Date", 12),
            TableColumn::new("Category", 14),
            TableColumn::new("Seller", 12),
        ],
    );
    for expense in &expenses {
        let category = BudgetService::category_for_expense(&context.store, expense)
            .map(|category| category.name)
            .unwrap_or_else(|| "Uncategorized".into());
        table.add_row(vec![
            short_id(expense.id),
            expense.description.clone(),
            format_currency(expense.amount, &context.money),
            format_date(expense.date),
            category,
            expense.seller.clone().unwrap_or_default(),
        ]);
    }
    TableRenderer::render(&table, &style());
    output::info(format!(
        "{} expense(s), {} total",
        expenses.len(),
        format_currency(total_spend(&expenses), &context.money)
    ));
    Ok(())
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 4 {
        return Err(CommandError::usage(ADD_USAGE));
    }
    let arg = |index: usize| args.get(index).map(|value| value.to_string()).unwrap_or_default();
    let category = find_category(context, args[2])?;
    let draft = ExpenseDraft {
        description: arg(0),
        amount: arg(1),
        category_id: category.id.to_string(),
        date: arg(3),
        seller: arg(4),
        notes: arg(5),
    };
    let expense = ExpenseService::create(&mut context.store, draft.validate()?)?;
    output::success(format!(
        "Recorded expense `{}` of {} in {}",
        expense.description,
        format_currency(expense.amount, &context.money),
        category.name
    ));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(input) = args.first() else {
        return Err(CommandError::usage("expense remove <id>"));
    };
    let id = resolve_id(context.store.expenses().iter(), input)?;
    let removed = ExpenseService::delete(&mut context.store, id)?;
    output::success(format!("Deleted expense `{}`", removed.description));
    Ok(())
}
