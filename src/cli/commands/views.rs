use chrono::Datelike;

use crate::calendar::{bucket_by_day, CalendarMonth, SpendIntensity};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::{style, Table, TableColumn, TableRenderer};
use crate::core::services::{DealService, SummaryService};
use crate::currency::{format_currency, format_date, format_percentage};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "calendar",
            "Month grid of deal purchases",
            "calendar [YYYY-MM|next|prev|today]",
            cmd_calendar,
        ),
        CommandEntry::new("summary", "Dashboard statistics", "summary", cmd_summary),
        CommandEntry::new(
            "breakdown",
            "Deal spending per category",
            "breakdown",
            cmd_breakdown,
        ),
    ]
}

fn cmd_calendar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.calendar = match args.first().copied() {
        None => context.calendar,
        Some("next") => context.calendar.next()?,
        Some("prev") | Some("previous") => context.calendar.previous()?,
        Some("today") => CalendarMonth::from_date(context.store.today()),
        Some(raw) => raw.parse::<CalendarMonth>()?,
    };
    let month = context.calendar;
    let deals = DealService::get_all(&context.store);
    let buckets = bucket_by_day(&deals, month, |deal| deal.purchase_date);
    let style = style();

    output::section(month.label());
    println!("  Sun   Mon   Tue   Wed   Thu   Fri   Sat");
    for week in month.grid()? {
        let cells: Vec<String> = week
            .iter()
            .map(|day| {
                let marker = buckets
                    .get(&day.date)
                    .map(|records| SpendIntensity::for_records(records).marker())
                    .unwrap_or(" ");
                let cell = format!("{:>3}{marker} ", day.date.day());
                if day.in_month {
                    cell
                } else {
                    style.muted(&cell)
                }
            })
            .collect();
        println!("  {}", cells.join(" ").trim_end());
    }

    if buckets.is_empty() {
        output::info("No purchases this month.");
        return Ok(());
    }
    for (date, records) in &buckets {
        let total: f64 = records.iter().map(|deal| deal.amount).sum();
        let names: Vec<&str> = records.iter().map(|deal| deal.name.as_str()).collect();
        println!(
            "  {}  {:>10}  {}",
            format_date(*date),
            format_currency(total, &context.money),
            names.join(", ")
        );
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::usage("summary"));
    }
    let stats = SummaryService::dashboard(&context.store, context.config.recent_deals);
    let money = &context.money;

    output::section("Dashboard");
    output::two_column(&[
        ("Total deals", stats.deal_count.to_string()),
        ("Total spent", format_currency(stats.total_spent, money)),
        ("This month", format_currency(stats.spent_this_month, money)),
        ("Categories", stats.category_count.to_string()),
        ("Average deal", format_currency(stats.average_deal, money)),
    ]);
    if !stats.recent.is_empty() {
        output::section("Recent purchases");
        for deal in &stats.recent {
            println!(
                "  {}  {:>10}  {} ({})",
                format_date(deal.purchase_date),
                format_currency(deal.amount, money),
                deal.name,
                deal.seller
            );
        }
    }
    Ok(())
}

fn cmd_breakdown(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let breakdown = SummaryService::breakdown(&context.store);
    if breakdown.groups.is_empty() {
        output::info("No deals recorded yet.");
        return Ok(());
    }
    let mut table = Table::new(
        Some("Spending by category"),
        vec![
            TableColumn::new("Category", 16),
            TableColumn::numeric("Deals", 5),
            TableColumn::numeric("Total", 11),
            TableColumn::numeric("Average", 11),
            TableColumn::numeric("Share", 7),
        ],
    );
    for group in &breakdown.groups {
        table.add_row(vec![
            group.key.clone(),
            group.count.to_string(),
            format_currency(group.total, &context.money),
            format_currency(group.average(), &context.money),
            format_percentage(group.share_of(breakdown.total)),
        ]);
    }
    TableRenderer::render(&table, &style());
    Ok(())
}
