use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::model::record::CanonicalRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Title,
    Year,
    YourRating,
    ImdbRating,
    #[default]
    DateRated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// One page of the sorted, filtered records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub rows: Vec<CanonicalRecord>,
    /// 1-based, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
}

/// Sorts `records` by `key` and cuts out page `page` (1-based). Missing values
/// sort below everything else, so they lead ascending and trail descending.
/// Out-of-range pages are clamped into `1..=total_pages`.
pub fn build_view(
    records: &[CanonicalRecord],
    key: SortKey,
    direction: SortDirection,
    page_size: usize,
    page: usize,
) -> TableView {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| match direction {
        SortDirection::Asc => compare(a, b, key),
        SortDirection::Desc => compare(b, a, key),
    });

    let page_size = page_size.max(1);
    let total_pages = total_pages(sorted.len(), page_size);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(sorted.len());

    TableView {
        total_records: sorted.len(),
        rows: sorted.get(start..end).map(<[_]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

fn compare(a: &CanonicalRecord, b: &CanonicalRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Year => a.year.cmp(&b.year),
        SortKey::YourRating => compare_numbers(a.your_rating, b.your_rating),
        SortKey::ImdbRating => compare_numbers(a.imdb_rating, b.imdb_rating),
        SortKey::DateRated => a.date_rated.cmp(&b.date_rated),
    }
}

fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "year" => Ok(SortKey::Year),
            "your-rating" | "rating" => Ok(SortKey::YourRating),
            "imdb-rating" | "imdb" => Ok(SortKey::ImdbRating),
            "date-rated" | "date" => Ok(SortKey::DateRated),
            other => Err(format!(
                "Unknown sort key '{}', expected one of title, year, your-rating, imdb-rating, date-rated",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Title => "title",
            SortKey::Year => "year",
            SortKey::YourRating => "your-rating",
            SortKey::ImdbRating => "imdb-rating",
            SortKey::DateRated => "date-rated",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction '{}'", other)),
        }
    }
}
