use std::{io, io::prelude::*, path::PathBuf, process};

use clap::Parser;

use ratings_dashboard::{
    config::{AppConfig, DEFAULT_CONFIG_PATH},
    model::filter::FilterState,
    views::table_view::{SortDirection, SortKey},
    RunOptions,
};

mod logging;

/// Statistics and a sortable table for a personal ratings export.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path or http(s) URL of the ratings CSV. Defaults to the last URL used.
    source: Option<String>,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Case-insensitive title substring.
    #[arg(short, long, default_value = "")]
    query: String,

    #[arg(long)]
    year_min: Option<i32>,

    #[arg(long)]
    year_max: Option<i32>,

    #[arg(long, default_value_t = 0.0)]
    min_rating: f64,

    /// Exact title type, e.g. "Movie" or "TV Series".
    #[arg(long = "type")]
    title_type: Option<String>,

    /// Keep titles having any of these genres. Repeatable.
    #[arg(short, long = "genre")]
    genres: Vec<String>,

    #[arg(long, default_value_t = SortKey::DateRated)]
    sort: SortKey,

    #[arg(long)]
    asc: bool,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long)]
    page_size: Option<usize>,

    /// Write the filtered rows, all pages, to this CSV file.
    #[arg(long)]
    export: Option<String>,

    /// Look up posters for the rows on the current page.
    #[arg(long)]
    posters: bool,

    #[arg(long)]
    dark: Option<bool>,

    #[arg(long)]
    accent: Option<String>,
}

fn prompt_for_source() -> String {
    print!("Please, enter the path or URL of your ratings CSV: ");
    io::stdout().flush().expect("could not flush stdout");
    let mut user_input = String::new();
    io::stdin()
        .read_line(&mut user_input)
        .expect("Failed to read user input");
    user_input.trim().to_string()
}

#[tokio::main]
async fn main() {
    logging::setup_logging();

    let cli = Cli::parse();
    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Could not read config {}: {}", cli.config.display(), e);
            process::exit(2);
        }
    };

    let source = cli
        .source
        .clone()
        .or_else(|| ratings_dashboard::last_source_url(&config))
        .unwrap_or_else(prompt_for_source);

    let options = RunOptions {
        source,
        filter: FilterState {
            query: cli.query,
            year_min: cli.year_min,
            year_max: cli.year_max,
            min_rating: cli.min_rating,
            title_type: cli.title_type,
            genres: cli.genres.into_iter().collect(),
        },
        sort_key: cli.sort,
        sort_direction: if cli.asc {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
        page: cli.page,
        page_size: cli.page_size,
        export_path: cli.export,
        posters: cli.posters,
        dark_mode: cli.dark,
        accent: cli.accent,
    };

    match ratings_dashboard::run(options, config).await {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Could not serialize report: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            log::error!("Could not load ratings: {}", e);
            process::exit(1);
        }
    }
}
