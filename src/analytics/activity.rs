use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::model::record::CanonicalRecord;

pub const MONTH_WINDOW: usize = 24;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayAverage {
    /// 0 is Sunday.
    pub weekday: u32,
    pub label: &'static str,
    /// 0 when nothing was rated that weekday.
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthActivity {
    pub year: i32,
    pub month: u32,
    /// `YYYY-MM`
    pub label: String,
    pub count: usize,
}

pub fn weekday_averages(records: &[CanonicalRecord]) -> Vec<WeekdayAverage> {
    let mut sums = [0.0f64; 7];
    let mut counts = [0usize; 7];

    for record in records {
        if let (Some(day), Some(rating)) = (record.date_rated, record.your_rating) {
            let weekday = day.weekday().num_days_from_sunday() as usize;
            sums[weekday] += rating;
            counts[weekday] += 1;
        }
    }

    (0..7)
        .map(|i| WeekdayAverage {
            weekday: i as u32,
            label: WEEKDAY_LABELS[i],
            average: if counts[i] == 0 {
                0.0
            } else {
                sums[i] / counts[i] as f64
            },
            count: counts[i],
        })
        .collect()
}

/// Ratings per calendar month for the 24 months ending with `today`'s month,
/// oldest first. The window follows the clock, not the data.
pub fn monthly_activity(records: &[CanonicalRecord], today: NaiveDate) -> Vec<MonthActivity> {
    let last = month_ordinal(today);
    let first = last - (MONTH_WINDOW as i64 - 1);

    let mut window: Vec<MonthActivity> = (first..=last)
        .map(|ordinal| {
            let year = ordinal.div_euclid(12) as i32;
            let month = ordinal.rem_euclid(12) as u32 + 1;
            MonthActivity {
                year,
                month,
                label: format!("{:04}-{:02}", year, month),
                count: 0,
            }
        })
        .collect();

    for day in records.iter().filter_map(|r| r.date_rated) {
        let ordinal = month_ordinal(day);
        if (first..=last).contains(&ordinal) {
            window[(ordinal - first) as usize].count += 1;
        }
    }

    window
}

fn month_ordinal(day: NaiveDate) -> i64 {
    day.year() as i64 * 12 + day.month0() as i64
}
