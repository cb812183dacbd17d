use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::record::CanonicalRecord;

pub const TOP_GENRES: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub rating: f64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub rating: u8,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAverage {
    pub year: i32,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub ratings_over_time: Vec<TimeSeriesPoint>,
    pub rating_histogram: Vec<HistogramBucket>,
    pub your_vs_imdb: Vec<ScatterPoint>,
    pub runtime_vs_rating: Vec<ScatterPoint>,
    pub year_averages: Vec<YearAverage>,
    pub top_genres: Vec<GenreCount>,
}

impl ChartData {
    pub fn compute(records: &[CanonicalRecord]) -> Self {
        ChartData {
            ratings_over_time: ratings_over_time(records),
            rating_histogram: rating_histogram(records),
            your_vs_imdb: your_vs_imdb(records),
            runtime_vs_rating: runtime_vs_rating(records),
            year_averages: year_averages(records),
            top_genres: top_genres(records),
        }
    }
}

pub fn ratings_over_time(records: &[CanonicalRecord]) -> Vec<TimeSeriesPoint> {
    let mut points: Vec<TimeSeriesPoint> = records
        .iter()
        .filter_map(|r| {
            Some(TimeSeriesPoint {
                date: r.date_rated?,
                rating: r.your_rating?,
                title: r.title.clone(),
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Ten buckets for ratings 1 through 10. Fractional ratings go to the
/// nearest whole bucket; anything outside [1, 10] is left out.
pub fn rating_histogram(records: &[CanonicalRecord]) -> Vec<HistogramBucket> {
    let mut counts = [0usize; 10];

    for rating in records.iter().filter_map(|r| r.your_rating) {
        if (1.0..=10.0).contains(&rating) {
            counts[rating.round() as usize - 1] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBucket {
            rating: i as u8 + 1,
            count,
        })
        .collect()
}

/// x is the IMDb rating, y your own.
pub fn your_vs_imdb(records: &[CanonicalRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                x: r.imdb_rating?,
                y: r.your_rating?,
                title: r.title.clone(),
            })
        })
        .collect()
}

/// x is the runtime in minutes, y your rating.
pub fn runtime_vs_rating(records: &[CanonicalRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                x: r.runtime_minutes?,
                y: r.your_rating?,
                title: r.title.clone(),
            })
        })
        .collect()
}

pub fn year_averages(records: &[CanonicalRecord]) -> Vec<YearAverage> {
    let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();

    for record in records {
        if let (Some(year), Some(rating)) = (record.year, record.your_rating) {
            let entry = by_year.entry(year).or_insert((0.0, 0));
            entry.0 += rating;
            entry.1 += 1;
        }
    }

    by_year
        .into_iter()
        .map(|(year, (sum, count))| YearAverage {
            year,
            average: sum / count as f64,
            count,
        })
        .collect()
}

/// Most frequent genres, ties in order of first appearance.
pub fn top_genres(records: &[CanonicalRecord]) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = vec![];
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for genre in records.iter().flat_map(|r| r.genres.iter()) {
        match positions.get(genre.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                positions.insert(genre.as_str(), counts.len());
                counts.push(GenreCount {
                    genre: genre.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_GENRES);
    counts
}
