use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::currency::month_name;
use crate::errors::{DealVaultError, Result};

/// A calendar month; the only state the calendar view carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading and trailing days borrowed from adjacent months.
    pub in_month: bool,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DealVaultError::InvalidInput(format!(
                "invalid month {year}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(self) -> Result<Self> {
        self.shift(1)
    }

    pub fn previous(self) -> Result<Self> {
        self.shift(-1)
    }

    /// Moves by `months`, rolling the year over in either direction. Fails
    /// when the target month lies outside the supported date range.
    pub fn shift(self, months: i32) -> Result<Self> {
        let index = self
            .year
            .checked_mul(12)
            .and_then(|base| base.checked_add(self.month as i32 - 1))
            .and_then(|index| index.checked_add(months))
            .ok_or_else(|| out_of_range(self, months))?;
        Self::new(index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
            .map_err(|_| out_of_range(self, months))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let last = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year, 12, 31)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).and_then(|next| next.pred_opt())
        };
        last.unwrap_or_else(|| self.first_day())
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day()
            .iter_days()
            .take_while(|date| self.contains(*date))
            .collect()
    }

    /// Header text such as `October 2026`.
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    /// Whole Sunday-first weeks covering the month. Fails for the first and
    /// last supported months when the padding days are not representable.
    pub fn grid(&self) -> Result<Vec<[CalendarDay; 7]>> {
        let first = self.first_day();
        let last = self.last_day();
        let lead = first.weekday().num_days_from_sunday() as i64;
        let trail = 6 - last.weekday().num_days_from_sunday() as i64;
        let start = first
            .checked_sub_signed(Duration::days(lead))
            .ok_or_else(|| grid_out_of_range(*self))?;
        let total = lead + last.day() as i64 + trail;

        let cells = (0..total)
            .map(|offset| {
                start
                    .checked_add_signed(Duration::days(offset))
                    .map(|date| CalendarDay {
                        date,
                        in_month: self.contains(date),
                    })
                    .ok_or_else(|| grid_out_of_range(*self))
            })
            .collect::<Result<Vec<CalendarDay>>>()?;
        Ok(cells
            .chunks_exact(7)
            .map(|week| [week[0], week[1], week[2], week[3], week[4], week[5], week[6]])
            .collect())
    }
}

fn out_of_range(from: CalendarMonth, months: i32) -> DealVaultError {
    DealVaultError::InvalidInput(format!(
        "moving {months} month(s) from {from} leaves the supported date range"
    ))
}

fn grid_out_of_range(month: CalendarMonth) -> DealVaultError {
    DealVaultError::InvalidInput(format!(
        "the calendar grid of {month} extends past the supported date range"
    ))
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for CalendarMonth {
    type Err = DealVaultError;

    /// Parses `YYYY-MM`.
    fn from_str(value: &str) -> Result<Self> {
        let invalid = || DealVaultError::InvalidInput(format!("expected YYYY-MM, got `{value}`"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> CalendarMonth {
        CalendarMonth::new(year, month).unwrap()
    }

    #[test]
    fn navigation_rolls_over_years() {
        assert_eq!(month(2024, 12).next().unwrap(), month(2025, 1));
        assert_eq!(month(2024, 1).previous().unwrap(), month(2023, 12));
        assert_eq!(month(2024, 3).shift(-15).unwrap(), month(2022, 12));
        assert_eq!(month(2024, 3).shift(22).unwrap(), month(2026, 1));
    }

    #[test]
    fn navigation_stops_at_the_supported_range() {
        let last = month(NaiveDate::MAX.year(), 12);
        assert_eq!(last.last_day(), NaiveDate::MAX);
        assert!(last.next().is_err());
        assert!(last.shift(i32::MAX).is_err());

        let first = month(NaiveDate::MIN.year(), 1);
        assert_eq!(first.first_day(), NaiveDate::MIN);
        assert!(first.previous().is_err());
    }

    #[test]
    fn edge_month_grid_fails_instead_of_panicking() {
        let last = month(NaiveDate::MAX.year(), 12);
        let padded = last.last_day().weekday().num_days_from_sunday() != 6;
        assert_eq!(last.grid().is_err(), padded);
        let first = month(NaiveDate::MIN.year(), 1);
        let padded = first.first_day().weekday().num_days_from_sunday() != 0;
        assert_eq!(first.grid().is_err(), padded);
    }

    #[test]
    fn bounds_and_days_respect_leap_years() {
        let feb = month(2024, 2);
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(feb.days().len(), 29);
        assert_eq!(month(2023, 2).days().len(), 28);
        assert_eq!(month(2026, 10).label(), "October 2026");
    }

    #[test]
    fn grid_pads_to_whole_sunday_weeks() {
        // October 2026 starts on a Thursday and ends on a Saturday.
        let grid = month(2026, 10).grid().unwrap();
        assert_eq!(grid.len(), 5);
        let first_week = grid[0];
        assert_eq!(
            first_week[0].date,
            NaiveDate::from_ymd_opt(2026, 9, 27).unwrap()
        );
        assert!(!first_week[0].in_month);
        assert!(first_week[4].in_month);
        let last_week = grid[grid.len() - 1];
        assert_eq!(last_week[6].date, NaiveDate::from_ymd_opt(2026, 10, 31).unwrap());
        let in_month = grid.iter().flatten().filter(|day| day.in_month).count();
        assert_eq!(in_month, 31);
    }

    #[test]
    fn contains_checks_year_and_month() {
        let jan = month(2024, 1);
        assert!(jan.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()));
    }

    #[test]
    fn parses_year_month() {
        assert_eq!("2024-02".parse::<CalendarMonth>().unwrap(), month(2024, 2));
        assert!("2024-13".parse::<CalendarMonth>().is_err());
        assert!("february".parse::<CalendarMonth>().is_err());
        assert_eq!(month(2024, 2).to_string(), "2024-02");
    }
}
