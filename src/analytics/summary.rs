use crate::model::record::CanonicalRecord;

/// Arithmetic mean, `None` for an empty input.
pub fn average(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub fn average_your_rating(records: &[CanonicalRecord]) -> Option<f64> {
    average(records.iter().filter_map(|r| r.your_rating))
}

pub fn average_imdb_rating(records: &[CanonicalRecord]) -> Option<f64> {
    average(records.iter().filter_map(|r| r.imdb_rating))
}

/// Summed runtime in hours; records without a runtime add nothing.
pub fn watch_hours(records: &[CanonicalRecord]) -> f64 {
    records.iter().filter_map(|r| r.runtime_minutes).sum::<f64>() / 60.0
}
