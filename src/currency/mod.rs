//! Money and date presentation helpers shared by the shell and summaries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How amounts are rendered: currency code plus separators for the locale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoneyFormat {
    pub currency: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::for_locale("en-US", "USD")
    }
}

impl MoneyFormat {
    /// Picks separators from the language tag; unknown tags use `en-US` rules.
    pub fn for_locale(locale: &str, currency: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (decimal_separator, grouping_separator) = match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" => (',', '.'),
            "fr" | "sv" | "nb" | "fi" | "cs" | "pl" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            currency: currency.trim().to_ascii_uppercase(),
            decimal_separator,
            grouping_separator,
        }
    }
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "AUD" => "A$",
        "INR" => "₹",
        _ => code,
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Fixed-precision number with grouped thousands.
pub fn format_number(format: &MoneyFormat, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, fraction) = match body.split_once('.') {
        Some((int_part, fraction)) => (int_part, Some(fraction)),
        None => (body.as_str(), None),
    };
    let mut rendered = group_digits(int_part, format.grouping_separator);
    if let Some(fraction) = fraction {
        rendered.push(format.decimal_separator);
        rendered.push_str(fraction);
    }
    if value < 0.0 && rendered.chars().any(|ch| ch.is_ascii_digit() && ch != '0') {
        rendered.insert(0, '-');
    }
    rendered
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders `amount` with the currency symbol, e.g. `$1,234.50` or `-$12.00`.
pub fn format_currency(amount: f64, format: &MoneyFormat) -> String {
    let number = format_number(format, amount, minor_units_for(&format.currency));
    let symbol = symbol_for(&format.currency);
    match number.strip_prefix('-') {
        Some(positive) => format!("-{symbol}{positive}"),
        None => format!("{symbol}{number}"),
    }
}

/// Percentage with one decimal, e.g. `84.9%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Medium date form used in lists, e.g. `Jan 15, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}, {}", month_label(date.month()), date.day(), date.year())
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_grouped_usd() {
        let format = MoneyFormat::default();
        assert_eq!(format_currency(1234.5, &format), "$1,234.50");
        assert_eq!(format_currency(-12.0, &format), "-$12.00");
        assert_eq!(format_currency(0.0, &format), "$0.00");
        assert_eq!(format_currency(1_000_000.0, &format), "$1,000,000.00");
    }

    #[test]
    fn european_locale_swaps_separators() {
        let format = MoneyFormat::for_locale("de-DE", "eur");
        assert_eq!(format.currency, "EUR");
        assert_eq!(format_currency(1234.5, &format), "€1.234,50");
    }

    #[test]
    fn zero_minor_units_drop_fraction() {
        let format = MoneyFormat::for_locale("en-US", "JPY");
        assert_eq!(format_currency(12345.0, &format), "¥12,345");
    }

    #[test]
    fn dates_and_months_render() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_date(date), "Jan 15, 2024");
        assert_eq!(month_name(10), "October");
        assert_eq!(format_percentage(84.94), "84.9%");
    }
}
