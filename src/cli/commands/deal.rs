use crate::aggregate::total_spend;
use crate::cli::core::{resolve_id, short_id, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{style, Table, TableColumn, TableRenderer};
use crate::core::services::DealService;
use crate::currency::{format_currency, format_date};
use crate::domain::{Deal, DealDraft, DealPatch};
use crate::query::{DealField, DealQuery, SortSpec};

use super::ParsedArgs;

const USAGE: &str = "deal list [--search TEXT] [--seller NAME] [--category NAME] [--sort name|amount|date|seller-asc|desc]
deal show <id>
deal add <name> <amount> <YYYY-MM-DD> <seller> <category> [tags] [notes]
deal edit <id> <name|amount|date|seller|category|tags|notes> <value>
deal remove <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "deal",
        "List, inspect and record lifetime deals",
        USAGE,
        cmd_deal,
    )]
}

fn cmd_deal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => list(context, &[]),
        Some((&"list", rest)) => list(context, rest),
        Some((&"show", rest)) => show(context, rest),
        Some((&"add", rest)) => add(context, rest),
        Some((&"edit", rest)) => edit(context, rest),
        Some((&"remove", rest)) | Some((&"delete", rest)) => remove(context, rest),
        Some((other, _)) => Err(CommandError::InvalidArguments(format!(
            "unknown deal action `{other}`"
        ))),
    }
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args)?;
    let mut query = DealQuery::for_deals();
    if let Some(term) = parsed.flag("search") {
        query = query.search(term);
    }
    if let Some(seller) = parsed.flag("seller") {
        query = query.filter(DealField::Seller, seller);
    }
    if let Some(category) = parsed.flag("category") {
        query = query.filter(DealField::Category, category);
    }
    if let Some(sort) = parsed.flag("sort") {
        query = query.sort(sort.parse::<SortSpec<DealField>>()?);
    }

    let deals = DealService::search(&context.store, &query);
    if deals.is_empty() {
        if query.is_narrowing() {
            output::info("No deals match the current filters.");
        } else {
            output::info("No deals recorded yet. Add one with `deal add`.");
        }
        return Ok(());
    }

    let mut table = Table::new(
        Some("Deals"),
        vec![
            TableColumn::new("ID", 8),
            TableColumn::new("Name", 24),
            TableColumn::numeric("Amount", 11),
            TableColumn::new("Purchased", 12),
            TableColumn::new("Seller", 12),
            TableColumn::new("Category", 14),
        ],
    );
    for deal in &deals {
        table.add_row(vec![
            short_id(deal.id),
            deal.name.clone(),
            format_currency(deal.amount, &context.money),
            format_date(deal.purchase_date),
            deal.seller.clone(),
            deal.category.clone(),
        ]);
    }
    TableRenderer::render(&table, &style());
    output::info(format!(
        "{} deal(s), {} total",
        deals.len(),
        format_currency(total_spend(&deals), &context.money)
    ));
    Ok(())
}

fn find(context: &ShellContext, input: Option<&&str>) -> Result<Deal, CommandError> {
    let input = input.ok_or_else(|| CommandError::InvalidArguments("a deal id is required".into()))?;
    let id = resolve_id(context.store.deals().iter(), input)?;
    Ok(DealService::get_by_id(&context.store, id)?)
}

fn show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let deal = find(context, args.first())?;
    output::section(&deal.name);
    output::two_column(&[
        ("ID", deal.id.to_string()),
        ("Amount", format_currency(deal.amount, &context.money)),
        ("Purchased", format_date(deal.purchase_date)),
        ("Seller", deal.seller.clone()),
        ("Category", deal.category.clone()),
        ("Tags", deal.tags.join(", ")),
        ("Notes", deal.notes.clone()),
        ("Updated", deal.updated_at.format("%Y-%m-%d %H:%M UTC").to_string()),
    ]);
    Ok(())
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 5 {
        return Err(CommandError::usage(
            "deal add <name> <amount> <YYYY-MM-DD> <seller> <category> [tags] [notes]",
        ));
    }
    let arg = |index: usize| args.get(index).map(|value| value.to_string()).unwrap_or_default();
    let draft = DealDraft {
        name: arg(0),
        amount: arg(1),
        purchase_date: arg(2),
        seller: arg(3),
        category: arg(4),
        tags: arg(5),
        notes: arg(6),
    };
    let deal = DealService::create(&mut context.store, draft.validate()?)?;
    output::success(format!(
        "Recorded `{}` for {} ({})",
        deal.name,
        format_currency(deal.amount, &context.money),
        short_id(deal.id)
    ));
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [_, field, value] = args else {
        return Err(CommandError::usage(
            "deal edit <id> <name|amount|date|seller|category|tags|notes> <value>",
        ));
    };
    let deal = find(context, args.first())?;
    let mut draft = DealDraft::from_deal(&deal);
    let value = value.to_string();
    match field.to_ascii_lowercase().as_str() {
        "name" => draft.name = value,
        "amount" => draft.amount = value,
        "date" => draft.purchase_date = value,
        "seller" => draft.seller = value,
        "category" => draft.category = value,
        "tags" => draft.tags = value,
        "notes" => draft.notes = value,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown deal field `{other}`"
            )))
        }
    }
    let patch = DealPatch::from(draft.validate()?);
    let updated = DealService::update(&mut context.store, deal.id, patch)?;
    output::success(format!("Updated `{}`", updated.name));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let deal = find(context, args.first())?;
    let removed = DealService::delete(&mut context.store, deal.id)?;
    output::success(format!("Deleted `{}`", removed.name));
    Ok(())
}
