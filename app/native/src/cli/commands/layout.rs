//! Layout CLI command.
//!
//! Lays out placeholder pages for a container width and prints where every
//! card lands.

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::{self, PinboardConfig};
use crate::constants::feed::FIRST_PAGE;
use crate::error::PinboardError;
use crate::feed::{Pin, PinFilter, PlaceholderSource};
use crate::masonry::{GridGeometry, TileFrame, compute_layout};

/// Maximum characters shown in the title column.
const TITLE_MAX_CHARS: usize = 32;

/// Arguments for `pinboard layout`.
#[derive(Args, Debug, Clone)]
#[command(after_long_help = r#"Examples:
  pinboard layout --width 904                 # One page in three columns
  pinboard layout --width 1200 --pages 3      # Three pages in four columns
  pinboard layout --width 904 --topic travel  # Only pins matching a topic
  pinboard layout --width 904 --json          # Output frames as JSON"#)]
pub struct LayoutArgs {
    /// Container width in pixels.
    #[arg(long, short = 'w')]
    pub width: u32,

    /// Number of placeholder pages to lay out.
    #[arg(long, short = 'p', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Seed for the placeholder dimensions.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Only lay out pins whose title or description contains this text.
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Only lay out pins matching this topic.
    #[arg(long)]
    pub topic: Option<String>,

    /// Output in JSON format instead of a table.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Keep running and print a new layout whenever the configuration file changes.
    #[arg(long)]
    pub watch: bool,
}

/// Computed layout of the requested pages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub width: u32,
    pub column_count: usize,
    pub content_width: u32,
    pub total_height: u32,
    pub column_heights: Vec<u32>,
    pub frames: Vec<TileFrame<String>>,
    #[serde(skip)]
    titles: Vec<String>,
}

/// Builds the layout report for `args` under `config`.
///
/// # Errors
///
/// Returns an error if a placeholder page cannot be generated.
pub fn build_report(args: &LayoutArgs, config: &PinboardConfig) -> Result<LayoutReport, PinboardError> {
    let geometry = GridGeometry::from_config(&config.grid);
    let source = PlaceholderSource::new(args.seed);

    let mut pins: Vec<Pin> = Vec::new();
    for page in FIRST_PAGE..FIRST_PAGE.saturating_add(args.pages) {
        pins.extend(source.generate(page, config.feed.page_size)?);
    }

    let mut filter = PinFilter::new();
    if let Some(query) = &args.query {
        filter.set_query(query.as_str());
    }
    filter.set_topic(args.topic.as_deref());

    let matching: Vec<&Pin> = pins.iter().filter(|pin| filter.matches(pin)).collect();
    let layout = compute_layout(matching.iter().copied(), args.width, &geometry);

    Ok(LayoutReport {
        width: args.width,
        column_count: layout.column_count(),
        content_width: layout.content_width(),
        total_height: layout.total_height(),
        column_heights: layout.column_heights().to_vec(),
        frames: layout.frames(),
        titles: matching.iter().map(|pin| pin.display_title().to_string()).collect(),
    })
}

/// Execute the layout command.
///
/// # Errors
///
/// Returns an error if the layout cannot be built or the configuration
/// file cannot be watched.
pub fn execute(args: &LayoutArgs) -> Result<(), PinboardError> {
    print_report(&build_report(args, config::get_config())?, args.json)?;

    if args.watch {
        watch(args)?;
    }

    Ok(())
}

/// Reprints the layout on every configuration change. Never returns on success.
fn watch(args: &LayoutArgs) -> Result<(), PinboardError> {
    let Some(path) = config::get_config_path() else {
        return Err(PinboardError::InvalidArguments(
            "--watch needs a configuration file; run 'pinboard config init' first".to_string(),
        ));
    };

    let watched = args.clone();
    let _watcher = config::watch_config_file(path, move |config| {
        match build_report(&watched, &config) {
            Ok(report) => {
                if let Err(err) = print_report(&report, watched.json) {
                    tracing::warn!("layout: failed to print report: {err}");
                }
            }
            Err(err) => tracing::warn!("layout: rebuild failed: {err}"),
        }
    })
    .map_err(|err| PinboardError::ConfigError(err.to_string()))?;

    eprintln!("{} {}", "Watching".dimmed(), path.display());
    loop {
        std::thread::park();
    }
}

fn print_report(report: &LayoutReport, json: bool) -> Result<(), PinboardError> {
    #[derive(Tabled)]
    struct FrameRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Column")]
        column: usize,
        #[tabled(rename = "Left")]
        left: u32,
        #[tabled(rename = "Top")]
        top: u32,
        #[tabled(rename = "Height")]
        height: u32,
    }

    if json {
        return output::print_json(report);
    }

    if report.frames.is_empty() {
        println!("{}", "No pins to lay out.".dimmed());
        return Ok(());
    }

    let rows: Vec<FrameRow> = report
        .frames
        .iter()
        .zip(&report.titles)
        .map(|(frame, title)| FrameRow {
            id: frame.id.clone(),
            title: clip_title(title),
            column: frame.column,
            left: frame.left,
            top: frame.top,
            height: frame.height,
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .with(Modify::new(Columns::new(2..6)).with(Alignment::right()))
        .to_string();

    let count = report.frames.len();
    let columns = report.column_count;
    println!("{}", format!("Layout ({count} pins, {columns} columns)").bold());
    println!("{table}");
    println!(
        "{} {}px  {} {}px",
        "Content width:".dimmed(),
        report.content_width,
        "Total height:".dimmed(),
        report.total_height
    );

    Ok(())
}

/// Shortens a title to [`TITLE_MAX_CHARS`] characters, ending in `…` when cut.
fn clip_title(title: &str) -> String {
    match title.char_indices().nth(TITLE_MAX_CHARS - 1) {
        Some((cut, _)) if title.chars().count() > TITLE_MAX_CHARS => format!("{}…", &title[..cut]),
        _ => title.to_string(),
    }
}
