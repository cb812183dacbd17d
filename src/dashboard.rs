use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    analytics::AggregateSummary,
    clients::http_client::HttpClient,
    error::Result,
    extractors::record_extractor::RecordExtractor,
    filters::record_filter,
    loaders::csv_loader::{CsvLoader, Source},
    model::{filter::FilterState, raw_row::RawTable, record::CanonicalRecord},
    persisters::csv_writer::CsvWriter,
    views::table_view::{self, SortDirection, SortKey, TableView},
};

/// Values the filter controls can offer for the loaded data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub year_bounds: Option<(i32, i32)>,
    pub title_types: Vec<String>,
    pub genres: Vec<String>,
}

/// A loaded source: the rows as read and their normalized records, index for
/// index.
#[derive(Debug, Clone, Default)]
struct Snapshot {
    table: RawTable,
    records: Vec<CanonicalRecord>,
}

/// One viewing session. Every derived value is rebuilt from the current
/// snapshot and controls on request; nothing is updated in place.
#[derive(Debug, Clone)]
pub struct Dashboard {
    snapshot: Snapshot,
    filter: FilterState,
    sort_key: SortKey,
    sort_direction: SortDirection,
    page_size: usize,
    page: usize,
}

impl Dashboard {
    pub fn new(page_size: usize) -> Self {
        Dashboard {
            snapshot: Snapshot::default(),
            filter: FilterState::default(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            page_size: page_size.max(1),
            page: 1,
        }
    }

    /// Replaces the data with `source`. On failure the previous data stays.
    pub async fn load(&mut self, source: &Source, client: &HttpClient) -> Result<usize> {
        match CsvLoader::load(source, client).await {
            Ok(table) => Ok(self.replace(table)),
            Err(e) => {
                log::warn!(
                    "Could not load {:?}, keeping {} previously loaded rows: {}",
                    source,
                    self.snapshot.records.len(),
                    e
                );
                Err(e)
            }
        }
    }

    pub fn load_text(&mut self, text: &str) -> Result<usize> {
        let table = CsvLoader::parse_text(text)?;
        Ok(self.replace(table))
    }

    fn replace(&mut self, table: RawTable) -> usize {
        let records = RecordExtractor::normalize_all(&table.rows);
        self.snapshot = Snapshot { table, records };
        self.page = 1;
        self.snapshot.records.len()
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.snapshot.records
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        self.sort_key = key;
        self.sort_direction = direction;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn filter_options(&self) -> FilterOptions {
        let records = self.records();
        FilterOptions {
            year_bounds: FilterState::year_bounds(records),
            title_types: FilterState::available_title_types(records),
            genres: FilterState::available_genres(records),
        }
    }

    fn filtered_indices(&self) -> Vec<usize> {
        self.snapshot
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| record_filter::matches(r, &self.filter))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn filtered(&self) -> Vec<CanonicalRecord> {
        record_filter::apply(self.records(), &self.filter)
    }

    pub fn summary(&self, today: NaiveDate) -> AggregateSummary {
        AggregateSummary::compute(&self.filtered(), today)
    }

    pub fn view(&self) -> TableView {
        table_view::build_view(
            &self.filtered(),
            self.sort_key,
            self.sort_direction,
            self.page_size,
            self.page,
        )
    }

    /// Filtered rows (every page) in their source columns.
    pub fn export_csv(&self) -> Result<String> {
        let rows = self.filtered_indices();
        CsvWriter::rows_to_string(
            &self.snapshot.table.headers,
            rows.iter().map(|&i| &self.snapshot.table.rows[i]),
        )
    }

    pub fn save_export(&self, file_name: &str) -> Result<()> {
        let rows = self.filtered_indices();
        CsvWriter::save_rows_to_csv(
            &self.snapshot.table.headers,
            rows.iter().map(|&i| &self.snapshot.table.rows[i]),
            file_name,
        )
    }
}
