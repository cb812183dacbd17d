use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::record::CanonicalRecord;

/// Active filter controls. `Default` constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Case-insensitive substring of the title.
    pub query: String,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    /// Zero means no threshold.
    pub min_rating: f64,
    /// `None` matches every title type.
    pub title_type: Option<String>,
    /// A record passes when it carries any of these.
    pub genres: BTreeSet<String>,
}

impl FilterState {
    /// Smallest and largest year in the data, i.e. the unconstrained range.
    pub fn year_bounds(records: &[CanonicalRecord]) -> Option<(i32, i32)> {
        let mut years = records.iter().filter_map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    pub fn available_title_types(records: &[CanonicalRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.title_type.as_str())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn available_genres(records: &[CanonicalRecord]) -> Vec<String> {
        records
            .iter()
            .flat_map(|r| r.genres.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::fixtures::record;

    #[test]
    fn bounds_and_choices_come_from_the_data() {
        let records = vec![
            CanonicalRecord {
                year: Some(1999),
                genres: vec!["Drama".into(), "Crime".into()],
                ..record("a")
            },
            CanonicalRecord {
                year: Some(1972),
                title_type: "TV Series".into(),
                genres: vec!["Crime".into()],
                ..record("b")
            },
            record("c"),
        ];

        assert_eq!(FilterState::year_bounds(&records), Some((1972, 1999)));
        assert_eq!(
            FilterState::available_title_types(&records),
            vec!["Movie".to_string(), "TV Series".to_string()]
        );
        assert_eq!(
            FilterState::available_genres(&records),
            vec!["Crime".to_string(), "Drama".to_string()]
        );
        assert_eq!(FilterState::year_bounds(&[]), None);
    }
}
