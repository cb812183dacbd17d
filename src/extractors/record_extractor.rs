use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::{raw_row::RawRow, record::CanonicalRecord};

// Header spellings seen across export versions, most specific first.
const TITLE_COLUMNS: &[&str] = &["Title", "Original Title", "primaryTitle", "name"];
const TITLE_TYPE_COLUMNS: &[&str] = &["Title Type", "titleType", "type"];
const URL_COLUMNS: &[&str] = &["URL", "link"];
const GENRE_COLUMNS: &[&str] = &["Genres", "genre"];
const DIRECTOR_COLUMNS: &[&str] = &["Directors", "Director"];
const ID_COLUMNS: &[&str] = &["Const", "tconst", "imdb_id", "id"];
const YOUR_RATING_COLUMNS: &[&str] = &["Your Rating", "YourRating", "your_rating", "rating"];
const IMDB_RATING_COLUMNS: &[&str] = &["IMDb Rating", "imdbRating", "imdb_rating"];
const RUNTIME_COLUMNS: &[&str] = &["Runtime (mins)", "runtimeMinutes", "Runtime"];
const YEAR_COLUMNS: &[&str] = &["Year", "startYear"];
const DATE_RATED_COLUMNS: &[&str] = &["Date Rated", "dateRated", "Date Added", "created"];
const RELEASE_DATE_COLUMNS: &[&str] = &["Release Date", "releaseDate"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

#[derive(Debug)]
pub struct RecordExtractor {}

impl RecordExtractor {
    /// Total: every row yields a record, unreadable fields come back empty.
    pub fn normalize(row: &RawRow, index: usize) -> CanonicalRecord {
        CanonicalRecord {
            title: Self::text(row, TITLE_COLUMNS).unwrap_or_default(),
            title_type: Self::text(row, TITLE_TYPE_COLUMNS).unwrap_or_default(),
            url: Self::text(row, URL_COLUMNS),
            genres: Self::text(row, GENRE_COLUMNS)
                .map(|g| Self::parse_genres(&g))
                .unwrap_or_default(),
            directors: Self::text(row, DIRECTOR_COLUMNS).unwrap_or_default(),
            external_id: Self::text(row, ID_COLUMNS).unwrap_or_else(|| index.to_string()),
            your_rating: Self::number(row, YOUR_RATING_COLUMNS),
            imdb_rating: Self::number(row, IMDB_RATING_COLUMNS),
            runtime_minutes: Self::number(row, RUNTIME_COLUMNS),
            year: Self::number(row, YEAR_COLUMNS).map(Self::whole_year),
            date_rated: Self::date(row, DATE_RATED_COLUMNS),
            release_date: Self::date(row, RELEASE_DATE_COLUMNS),
        }
    }

    pub fn normalize_all(rows: &[RawRow]) -> Vec<CanonicalRecord> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| Self::normalize(row, index))
            .collect()
    }

    fn lookup<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<&'a str> {
        candidates
            .iter()
            .find_map(|column| row.get_ignore_case(column))
    }

    fn text(row: &RawRow, candidates: &[&str]) -> Option<String> {
        Self::lookup(row, candidates).map(|v| v.trim().to_string())
    }

    fn number(row: &RawRow, candidates: &[&str]) -> Option<f64> {
        Self::lookup(row, candidates).and_then(Self::parse_number)
    }

    fn date(row: &RawRow, candidates: &[&str]) -> Option<NaiveDate> {
        Self::lookup(row, candidates).and_then(Self::parse_date)
    }

    /// Keeps only digits, `.` and `-` before converting, so "8,5" reads as 85
    /// and "7-8" is rejected.
    pub fn parse_number(value: &str) -> Option<f64> {
        let stripped: String = value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();

        if stripped.is_empty() {
            return None;
        }

        stripped.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
            return Some(date_time.date_naive());
        }

        DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|dt| dt.date())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            })
    }

    pub fn parse_genres(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(String::from)
            .collect()
    }

    /// Nearest whole year; the cast saturates for values beyond `i32`.
    fn whole_year(year: f64) -> i32 {
        year.round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imdb_row() -> RawRow {
        RawRow::from_pairs(&[
            ("Const", "tt0111161"),
            ("Your Rating", "10"),
            ("Date Rated", "2024-01-03"),
            ("Title", "The Shawshank Redemption"),
            ("URL", "https://www.imdb.com/title/tt0111161/"),
            ("Title Type", "Movie"),
            ("IMDb Rating", "9.3"),
            ("Runtime (mins)", "142"),
            ("Year", "1994"),
            ("Genres", "Drama"),
            ("Release Date", "1994-09-10"),
            ("Directors", "Frank Darabont"),
        ])
    }

    #[test]
    fn normalizes_a_standard_export_row() {
        let record = RecordExtractor::normalize(&imdb_row(), 7);

        assert_eq!(record.title, "The Shawshank Redemption");
        assert_eq!(record.external_id, "tt0111161");
        assert_eq!(record.your_rating, Some(10.0));
        assert_eq!(record.imdb_rating, Some(9.3));
        assert_eq!(record.runtime_minutes, Some(142.0));
        assert_eq!(record.year, Some(1994));
        assert_eq!(record.genres, vec!["Drama".to_string()]);
        assert_eq!(record.date_rated, NaiveDate::from_ymd_opt(2024, 1, 3));
        assert_eq!(record.release_date, NaiveDate::from_ymd_opt(1994, 9, 10));
        assert_eq!(
            record.url.as_deref(),
            Some("https://www.imdb.com/title/tt0111161/")
        );
    }

    #[test]
    fn header_spelling_variants_are_accepted() {
        let row = RawRow::from_pairs(&[
            ("title", "Heat"),
            ("your rating", "8"),
            ("rating", "3"),
            ("GENRES", " Crime ,, Drama , Crime"),
        ]);

        let record = RecordExtractor::normalize(&row, 0);

        assert_eq!(record.title, "Heat");
        assert_eq!(record.your_rating, Some(8.0));
        assert_eq!(record.genres, vec!["Crime", "Drama", "Crime"]);
    }

    #[test]
    fn first_non_empty_candidate_wins() {
        let row = RawRow::from_pairs(&[("Your Rating", ""), ("rating", "6")]);

        assert_eq!(RecordExtractor::normalize(&row, 0).your_rating, Some(6.0));
    }

    #[test]
    fn empty_row_degrades_to_empty_record() {
        let record = RecordExtractor::normalize(&RawRow::default(), 42);

        assert_eq!(record.title, "");
        assert_eq!(record.external_id, "42");
        assert!(record.genres.is_empty());
        assert_eq!(record.your_rating, None);
        assert_eq!(record.date_rated, None);
        assert_eq!(record.url, None);
    }

    #[test]
    fn number_parsing_strips_everything_but_digits_dots_and_dashes() {
        assert_eq!(RecordExtractor::parse_number("142 min"), Some(142.0));
        assert_eq!(RecordExtractor::parse_number("N/A"), None);
        assert_eq!(RecordExtractor::parse_number("7-8"), None);
        assert_eq!(RecordExtractor::parse_number("8.5/10"), Some(8.51));
        assert_eq!(RecordExtractor::parse_number("-1"), Some(-1.0));
        assert_eq!(RecordExtractor::parse_number("1.2.3"), None);
        assert_eq!(RecordExtractor::parse_number(""), None);
    }

    #[test]
    fn date_parsing_accepts_common_export_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 1);

        assert_eq!(RecordExtractor::parse_date("2024-02-01"), expected);
        assert_eq!(RecordExtractor::parse_date("2024-02-01T22:15:00Z"), expected);
        assert_eq!(RecordExtractor::parse_date("2024-02-01 08:00:00"), expected);
        assert_eq!(RecordExtractor::parse_date("02/01/2024"), expected);
        assert_eq!(RecordExtractor::parse_date("Feb 1, 2024"), expected);
        assert_eq!(RecordExtractor::parse_date("1 February 2024"), expected);
        assert_eq!(RecordExtractor::parse_date("not a date"), None);
        assert_eq!(RecordExtractor::parse_date("2024-13-45"), None);
    }

    #[test]
    fn fractional_year_rounds_to_nearest_year() {
        let row = RawRow::from_pairs(&[("Year", "1994.5")]);
        assert_eq!(RecordExtractor::normalize(&row, 0).year, Some(1995));

        let row = RawRow::from_pairs(&[("Year", "2001.2")]);
        assert_eq!(RecordExtractor::normalize(&row, 0).year, Some(2001));
    }

    #[test]
    fn normalizing_twice_gives_equal_records() {
        let row = imdb_row();

        assert_eq!(
            RecordExtractor::normalize(&row, 3),
            RecordExtractor::normalize(&row, 3)
        );
    }

    #[test]
    fn normalize_all_is_one_to_one_and_ordered() {
        let rows = vec![
            RawRow::from_pairs(&[("Title", "A")]),
            RawRow::from_pairs(&[("Title", "B")]),
        ];

        let records = RecordExtractor::normalize_all(&rows);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "A");
        assert_eq!(records[1].external_id, "1");
    }
}
