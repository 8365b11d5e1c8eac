//! Mini month calendar

use chrono::{Datelike, NaiveDate};

/// Layout of one month for the calendar widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// e.g. "March 2024"
    pub title: String,
    /// Empty cells before the 1st, with Sunday as the first column
    pub leading_blanks: u32,
    pub days_in_month: u32,
    /// Day of the month to highlight
    pub today: u32,
}

impl MonthGrid {
    /// Builds the grid for the month containing `date`
    pub fn for_date(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let days_in_month = days_in_month(date.year(), date.month());

        Self {
            title: first.format("%B %Y").to_string(),
            leading_blanks: first.weekday().num_days_from_sunday(),
            days_in_month,
            today: date.day(),
        }
    }

    /// Rows of seven cells; `None` marks a blank
    pub fn weeks(&self) -> Vec<[Option<u32>; 7]> {
        let mut cells: Vec<Option<u32>> = (0..self.leading_blanks).map(|_| None).collect();
        cells.extend((1..=self.days_in_month).map(Some));

        cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}
