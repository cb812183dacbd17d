use crate::model::{filter::FilterState, record::CanonicalRecord};

/// Dimensions are ANDed. A record lacking the field a dimension looks at
/// (no year, no rating, blank title type, no genres) passes that dimension.
pub fn matches(record: &CanonicalRecord, filter: &FilterState) -> bool {
    matches_query(record, &filter.query)
        && matches_years(record, filter.year_min, filter.year_max)
        && matches_min_rating(record, filter.min_rating)
        && matches_title_type(record, filter.title_type.as_deref())
        && matches_genres(record, filter)
}

/// Snapshot of the records passing `filter`, in input order.
pub fn apply(records: &[CanonicalRecord], filter: &FilterState) -> Vec<CanonicalRecord> {
    records
        .iter()
        .filter(|r| matches(r, filter))
        .cloned()
        .collect()
}

fn matches_query(record: &CanonicalRecord, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    record.title.to_lowercase().contains(&query.to_lowercase())
}

fn matches_years(record: &CanonicalRecord, min: Option<i32>, max: Option<i32>) -> bool {
    match record.year {
        None => true,
        Some(year) => min.map_or(true, |m| year >= m) && max.map_or(true, |m| year <= m),
    }
}

fn matches_min_rating(record: &CanonicalRecord, min_rating: f64) -> bool {
    if min_rating <= 0.0 {
        return true;
    }
    record.your_rating.map_or(true, |r| r >= min_rating)
}

fn matches_title_type(record: &CanonicalRecord, title_type: Option<&str>) -> bool {
    match title_type {
        None => true,
        Some(_) if record.title_type.is_empty() => true,
        Some(wanted) => record.title_type == wanted,
    }
}

fn matches_genres(record: &CanonicalRecord, filter: &FilterState) -> bool {
    filter.genres.is_empty()
        || record.genres.is_empty()
        || filter.genres.iter().any(|g| record.has_genre(g))
}
