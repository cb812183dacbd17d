use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

pub mod analytics;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod filters;
pub mod loaders;
pub mod model;
pub mod persisters;
pub mod views;

use analytics::AggregateSummary;
use clients::http_client::HttpClient;
use config::AppConfig;
use dashboard::{Dashboard, FilterOptions};
use error::Result;
use fetchers::poster_fetcher::PosterFetcher;
use loaders::csv_loader::Source;
use model::filter::FilterState;
use persisters::preferences_store::{Preferences, PreferencesStore};
use views::table_view::{SortDirection, SortKey, TableView};

/// Controls for a single dashboard render.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub source: String,
    pub filter: FilterState,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: Option<usize>,
    pub export_path: Option<String>,
    pub posters: bool,
    pub dark_mode: Option<bool>,
    pub accent: Option<String>,
}

/// Everything a front end needs to draw the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub source: String,
    pub total_records: usize,
    pub filter: FilterState,
    pub filter_options: FilterOptions,
    pub summary: AggregateSummary,
    pub table: TableView,
    pub posters: HashMap<String, String>,
    pub preferences: Preferences,
}

pub fn last_source_url(config: &AppConfig) -> Option<String> {
    PreferencesStore::open(PathBuf::from(&config.preferences_path))
        .preferences()
        .last_source_url
        .clone()
}

pub async fn run(options: RunOptions, config: AppConfig) -> Result<DashboardReport> {
    let client = HttpClient::new(&config.http.user_agent, config.http.timeout())?;
    let mut preferences = PreferencesStore::open(PathBuf::from(&config.preferences_path));

    let source = Source::parse(&options.source);
    let mut dashboard = Dashboard::new(options.page_size.unwrap_or(config.page_size));
    let loaded = dashboard.load(&source, &client).await?;
    log::info!("Normalized {} ratings", loaded);

    if let Some(url) = source.url() {
        if let Err(e) = preferences.remember_source_url(url) {
            log::warn!("Could not remember source url: {}", e);
        }
    }
    if options.dark_mode.is_some() || options.accent.is_some() {
        let dark_mode = options
            .dark_mode
            .unwrap_or(preferences.preferences().dark_mode);
        if let Err(e) = preferences.update_theme(dark_mode, options.accent.as_deref()) {
            log::warn!("Could not save theme preference: {}", e);
        }
    }

    dashboard.set_filter(options.filter);
    dashboard.set_sort(options.sort_key, options.sort_direction);
    dashboard.set_page(options.page);

    let today = chrono::Local::now().date_naive();
    let summary = dashboard.summary(today);
    let table = dashboard.view();
    log::info!(
        "{} of {} ratings match, showing page {} of {}",
        summary.count,
        loaded,
        table.page,
        table.total_pages
    );

    if let Some(export_path) = options.export_path.as_deref() {
        match dashboard.save_export(export_path) {
            Err(e) => log::error!("Error when exporting filtered ratings: {}", e),
            _ => log::info!("Successfully generated export file: {}", export_path),
        }
    }

    let posters = if options.posters || config.posters.enabled {
        let mut fetcher = PosterFetcher::new(client.clone(), &config.posters.title_base_url);
        fetcher.posters_for_page(&table.rows).await
    } else {
        HashMap::new()
    };

    Ok(DashboardReport {
        source: options.source,
        total_records: loaded,
        filter: dashboard.filter().clone(),
        filter_options: dashboard.filter_options(),
        summary,
        table,
        posters,
        preferences: preferences.preferences().clone(),
    })
}
