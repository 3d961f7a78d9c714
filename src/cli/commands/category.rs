use crate::cli::core::{resolve_id, short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{style, Table, TableColumn, TableRenderer};
use crate::core::services::BudgetService;
use crate::currency::format_currency;
use crate::domain::{Category, NewCategory};

const DEFAULT_COLOR: &str = "#6366f1";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "Manage expense categories",
        "category list\ncategory add <name> [color]\ncategory remove <name|id>",
        cmd_category,
    )]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None | Some((&"list", _)) => list(context),
        Some((&"add", rest)) => add(context, rest),
        Some((&"remove", rest)) | Some((&"delete", rest)) => remove(context, rest),
        Some((other, _)) => Err(CommandError::InvalidArguments(format!(
            "unknown category action `{other}`"
        ))),
    }
}

/// Finds a category by exact name (case-insensitive) or id prefix.
pub(crate) fn find_category(context: &ShellContext, input: &str) -> Result<Category, CommandError> {
    let by_name = context
        .store
        .categories()
        .find(|category| category.name.eq_ignore_ascii_case(input.trim()));
    if let Some(category) = by_name {
        return Ok(category);
    }
    let id = resolve_id(context.store.categories().iter(), input)?;
    Ok(BudgetService::category(&context.store, id)?)
}

fn list(context: &mut ShellContext) -> CommandResult {
    let categories = BudgetService::categories(&context.store);
    if categories.is_empty() {
        output::info("No categories yet. Add one with `category add <name>`.");
        return Ok(());
    }
    let mut table = Table::new(
        Some("Categories"),
        vec![
            TableColumn::new("ID", 8),
            TableColumn::new("Name", 18),
            TableColumn::new("Color", 8),
            TableColumn::numeric("Monthly limit", 13),
            TableColumn::numeric("Alert", 6),
        ],
    );
    for category in &categories {
        let limit = BudgetService::limit_for_category(&context.store, category.id);
        table.add_row(vec![
            short_id(category.id),
            category.name.clone(),
            category.color.clone(),
            limit
                .as_ref()
                .map(|limit| format_currency(limit.monthly_limit, &context.money))
                .unwrap_or_else(|| "-".into()),
            limit
                .as_ref()
                .map(|limit| format!("{:.0}%", limit.alert_threshold))
                .unwrap_or_else(|| "-".into()),
        ]);
    }
    TableRenderer::render(&table, &style());
    Ok(())
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(name) = args.first() else {
        return Err(CommandError::usage("category add <name> [color]"));
    };
    let color = args.get(1).copied().unwrap_or(DEFAULT_COLOR);
    let category = BudgetService::create_category(
        &mut context.store,
        NewCategory::new(name.trim(), color),
    )?;
    output::success(format!(
        "Created category `{}` ({})",
        category.name,
        short_id(category.id)
    ));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(input) = args.first() else {
        return Err(CommandError::usage("category remove <name|id>"));
    };
    let category = find_category(context, input)?;
    BudgetService::delete_category(&mut context.store, category.id)?;
    output::success(format!("Deleted category `{}`", category.name));
    Ok(())
}
