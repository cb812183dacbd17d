use chrono::NaiveDate;
use serde::Serialize;

/// Normalized view of one ratings export row.
///
/// Built once per [`RawRow`](super::raw_row::RawRow) and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub title: String,
    pub title_type: String,
    pub url: Option<String>,
    pub genres: Vec<String>,
    /// Comma separated, as found in the source.
    pub directors: String,
    /// Falls back to the row index when the source has no id column, so it is
    /// only unique within a single load.
    pub external_id: String,
    pub your_rating: Option<f64>,
    pub imdb_rating: Option<f64>,
    pub runtime_minutes: Option<f64>,
    pub year: Option<i32>,
    pub date_rated: Option<NaiveDate>,
    pub release_date: Option<NaiveDate>,
}

impl CanonicalRecord {
    pub fn director_names(&self) -> impl Iterator<Item = &str> {
        self.directors
            .split(',')
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(title: &str) -> CanonicalRecord {
        CanonicalRecord {
            title: title.to_string(),
            title_type: "Movie".to_string(),
            url: None,
            genres: vec![],
            directors: String::new(),
            external_id: title.to_string(),
            your_rating: None,
            imdb_rating: None,
            runtime_minutes: None,
            year: None,
            date_rated: None,
            release_date: None,
        }
    }

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn rated_on(title: &str, day: &str, rating: Option<f64>) -> CanonicalRecord {
        CanonicalRecord {
            date_rated: Some(date(day)),
            your_rating: rating,
            ..record(title)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn director_names_are_trimmed_and_blank_entries_dropped() {
        let movie = CanonicalRecord {
            directors: " Joel Coen, Ethan Coen ,,".to_string(),
            ..record("Fargo")
        };

        let names: Vec<&str> = movie.director_names().collect();
        assert_eq!(names, vec!["Joel Coen", "Ethan Coen"]);
    }
}
