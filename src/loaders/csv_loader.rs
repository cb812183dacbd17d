use std::{fs, path::Path};

use csv::ReaderBuilder;

use crate::{
    clients::http_client::HttpClient,
    error::{DashboardError, Result},
    model::raw_row::{RawRow, RawTable},
};

/// Where a ratings export comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(String),
    Url(String),
}

impl Source {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(input.to_string())
        } else {
            Source::File(input.to_string())
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Source::Url(url) => Some(url),
            Source::File(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct CsvLoader {}

impl CsvLoader {
    pub async fn load(source: &Source, client: &HttpClient) -> Result<RawTable> {
        let text = match source {
            Source::File(path) => Self::read_file(Path::new(path))?,
            Source::Url(url) => client.get_text(url).await?,
        };
        let table = Self::parse_text(&text)?;

        log::info!("Loaded {} rows from {:?}", table.rows.len(), source);
        Ok(table)
    }

    pub fn read_file(path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parses CSV text with a header row. Short rows are padded with empty
    /// values; a malformed document fails as a whole.
    pub fn parse_text(text: &str) -> Result<RawTable> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(DashboardError::MissingHeader(
                "the first line of the source is empty".to_string(),
            ));
        }

        let mut rows = vec![];
        for result in reader.records() {
            let record = result?;
            let fields = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| (header.clone(), record.get(idx).unwrap_or("").to_string()))
                .collect();
            rows.push(RawRow::new(fields));
        }

        Ok(RawTable { headers, rows })
    }
}
