//! Date composition and decomposition
//!
//! Columns are addressed positionally. For `date` and `datetime` the layout is
//! `[month, day, year, (hour, minute)]`, for `time` it is `[hour, minute]`.
//! The day column is regenerated whenever the selected month or year changes
//! its length, before any date is built from it, so an impossible triple such
//! as February 31 is never composed.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::column::{Column, ColumnKind};
use crate::config::Format;

pub const MONTH: usize = 0;
pub const DAY: usize = 1;
pub const YEAR: usize = 2;

/// Number of days in `month` (1-12) of `year`, leap years included
pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month.clamp(1, 12), 1)
        .map_or(31, |first| u32::from(first.num_days_in_month()))
}

/// Day values for a month: `1..=days_in_month`
pub fn day_values(year: i32, month: u32) -> Vec<i32> {
    (1..=days_in_month(year, month) as i32).collect()
}

/// Move `date` into the year range, keeping month, day and time where valid
///
/// February 29 moved into a common year becomes February 28.
pub fn clamp_year(date: NaiveDateTime, years: &RangeInclusive<i32>) -> NaiveDateTime {
    let year = date.year().clamp(*years.start(), *years.end());
    if year == date.year() {
        return date;
    }
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day)
        .map_or(date, |d| d.and_time(date.time()))
}

/// Result of a compose pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composed {
    pub date: NaiveDateTime,
    /// The day column's values were replaced during this pass
    pub day_regenerated: bool,
}

/// Keeps the column set and the composed date consistent
#[derive(Debug, Clone)]
pub struct DateSynchronizer {
    format: Format,
    /// (month, year) seen by the previous compose
    last_pair: Option<(u32, i32)>,
}

impl DateSynchronizer {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            last_pair: None,
        }
    }

    fn hour_column(&self) -> usize {
        match self.format {
            Format::Time => 0,
            _ => 3,
        }
    }

    /// Build the column set for `date`
    ///
    /// `date` should already lie within `years`.
    pub fn build_columns(&mut self, date: NaiveDateTime, years: &RangeInclusive<i32>) -> Vec<Column> {
        let columns: Vec<Column> = self
            .format
            .column_kinds()
            .iter()
            .map(|kind| match kind {
                ColumnKind::Month => Column::new(*kind, (1..=12).collect(), date.month() as i32),
                ColumnKind::Day => Column::new(
                    *kind,
                    day_values(date.year(), date.month()),
                    date.day() as i32,
                ),
                ColumnKind::Year => Column::new(*kind, years.clone().collect(), date.year()),
                ColumnKind::Hour => Column::new(*kind, (0..24).collect(), date.hour() as i32),
                ColumnKind::Minute => Column::new(*kind, (0..60).collect(), date.minute() as i32),
            })
            .collect();

        if self.format.has_date() {
            self.last_pair = Some((date.month(), date.year()));
        }
        columns
    }

    /// Regenerate the day column if it does not match (month, year)
    ///
    /// Returns whether the values changed.
    fn sync_day_column(columns: &mut [Column], year: i32, month: u32) -> bool {
        let required = days_in_month(year, month) as usize;
        let day = &mut columns[DAY];
        if day.len() == required {
            return false;
        }
        let preferred = day.selected_value();
        let index = day.regenerate(day_values(year, month));
        tracing::debug!(
            "day column regenerated for {}-{:02}: {} days, day {} -> {}",
            year,
            month,
            required,
            preferred,
            index + 1
        );
        true
    }

    /// Compose a date from the committed selections
    ///
    /// `anchor` supplies the calendar day for the `time` format.
    pub fn compose(&mut self, columns: &mut [Column], anchor: NaiveDate) -> Composed {
        let mut day_regenerated = false;

        let date = if self.format.has_date() {
            let month = columns[MONTH].selected_value().clamp(1, 12) as u32;
            let year = columns[YEAR].selected_value();
            if self.last_pair != Some((month, year)) {
                day_regenerated = Self::sync_day_column(columns, year, month);
                self.last_pair = Some((month, year));
            }
            let day = columns[DAY].selected_value().max(1) as u32;
            NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
                .unwrap_or(anchor)
        } else {
            anchor
        };

        let (hour, minute) = if self.format.has_time() {
            let hour_column = self.hour_column();
            (
                columns[hour_column].selected_value().clamp(0, 23) as u32,
                columns[hour_column + 1].selected_value().clamp(0, 59) as u32,
            )
        } else {
            (0, 0)
        };

        let date = date
            .and_hms_opt(hour, minute, 0)
            .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
        Composed {
            date,
            day_regenerated,
        }
    }

    /// Point every column at the fields of `date`
    ///
    /// Returns whether the day column's values were replaced. Years outside
    /// the year column clamp to its nearest end.
    pub fn decompose(&mut self, columns: &mut [Column], date: NaiveDateTime) -> bool {
        let mut day_regenerated = false;

        if self.format.has_date() {
            columns[MONTH].set_selected_index(date.month0() as usize);
            day_regenerated = Self::sync_day_column(columns, date.year(), date.month());
            columns[DAY].set_selected_index(date.day0() as usize);

            let year_column = &mut columns[YEAR];
            if !year_column.select_value(date.year()) {
                let first = year_column.values().first().copied().unwrap_or_default();
                let index = if date.year() < first {
                    0
                } else {
                    year_column.len() - 1
                };
                tracing::warn!(
                    "year {} outside the year column, clamped to {}",
                    date.year(),
                    year_column.values()[index]
                );
                year_column.set_selected_index(index);
            }
            // Leave last_pair alone: the next compose re-checks the day
            // column against whatever month and year ended up selected.
        }

        if self.format.has_time() {
            let hour_column = self.hour_column();
            columns[hour_column].select_value(date.hour() as i32);
            columns[hour_column + 1].select_value(date.minute() as i32);
        }
        day_regenerated
    }
}
