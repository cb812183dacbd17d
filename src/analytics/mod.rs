use chrono::NaiveDate;
use serde::Serialize;

use crate::model::record::CanonicalRecord;

pub mod activity;
pub mod charts;
pub mod highlights;
pub mod streaks;
pub mod summary;

use activity::{MonthActivity, WeekdayAverage};
use charts::ChartData;
use highlights::{Disagreement, TopDirector};
use streaks::{Gap, Streak};

/// Everything the dashboard derives from the filtered records.
///
/// Recomputed from scratch whenever the filtered set changes. `today` anchors
/// the monthly activity window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    pub count: usize,
    pub average_your_rating: Option<f64>,
    pub average_imdb_rating: Option<f64>,
    pub watch_hours: f64,
    pub rating_days: usize,
    pub longest_streak: Streak,
    pub longest_gap: Gap,
    pub biggest_disagreement: Option<Disagreement>,
    pub top_director: Option<TopDirector>,
    pub weekday_averages: Vec<WeekdayAverage>,
    pub monthly_activity: Vec<MonthActivity>,
    pub charts: ChartData,
}

impl AggregateSummary {
    pub fn compute(records: &[CanonicalRecord], today: NaiveDate) -> Self {
        let days = streaks::unique_days(records);
        log::debug!(
            "Aggregating {} records over {} rating days",
            records.len(),
            days.len()
        );

        AggregateSummary {
            count: records.len(),
            average_your_rating: summary::average_your_rating(records),
            average_imdb_rating: summary::average_imdb_rating(records),
            watch_hours: summary::watch_hours(records),
            rating_days: days.len(),
            longest_streak: streaks::longest_streak(&days),
            longest_gap: streaks::longest_gap(&days),
            biggest_disagreement: highlights::biggest_disagreement(records),
            top_director: highlights::top_director(records),
            weekday_averages: activity::weekday_averages(records),
            monthly_activity: activity::monthly_activity(records, today),
            charts: ChartData::compute(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::fixtures::{date, rated_on};

    #[test]
    fn empty_input_resolves_to_sentinels() {
        let summary = AggregateSummary::compute(&[], date("2024-06-01"));

        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_your_rating, None);
        assert_eq!(summary.watch_hours, 0.0);
        assert_eq!(summary.longest_streak.days, 0);
        assert_eq!(summary.longest_gap.days, 0);
        assert_eq!(summary.biggest_disagreement, None);
        assert_eq!(summary.top_director, None);
        assert_eq!(summary.weekday_averages.len(), 7);
        assert_eq!(summary.monthly_activity.len(), 24);
        assert!(summary.charts.ratings_over_time.is_empty());
        assert_eq!(summary.charts.rating_histogram.len(), 10);
    }

    #[test]
    fn single_day_gives_streak_one_and_gap_zero() {
        let records = vec![
            rated_on("a", "2024-05-05", Some(7.0)),
            rated_on("b", "2024-05-05", Some(9.0)),
        ];

        let summary = AggregateSummary::compute(&records, date("2024-06-01"));

        assert_eq!(summary.rating_days, 1);
        assert_eq!(summary.longest_streak.days, 1);
        assert_eq!(summary.longest_gap.days, 0);
        assert_eq!(summary.average_your_rating, Some(8.0));
    }
}
