//! Simulate CLI command.
//!
//! Drives a feed session with a scripted scroller: every step scrolls the
//! viewport down, reports whether the bottom sentinel is on screen and lets
//! the session react. Useful to watch pagination behave end to end without a
//! renderer.

use clap::Args;
use colored::Colorize;
use eyeball::Subscriber;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::{self, PinboardConfig};
use crate::error::PinboardError;
use crate::feed::{FeedSession, GridSnapshot, PlaceholderSource, SessionStats};
use crate::masonry::{ChannelHost, Footer, ViewportEvent};

/// Arguments for `pinboard simulate`.
#[derive(Args, Debug, Clone)]
#[command(after_long_help = r#"Examples:
  pinboard simulate                          # Scroll a 904px grid for 20 steps
  pinboard simulate --max-pages 3            # Scroll until the feed runs out
  pinboard simulate --fail-page 2 --json     # Watch a failed page as JSON"#)]
pub struct SimulateArgs {
    /// Container width in pixels.
    #[arg(long, short = 'w', default_value_t = 904)]
    pub width: u32,

    /// Visible height of the scroll viewport in pixels.
    #[arg(long, default_value_t = 800)]
    pub viewport_height: u32,

    /// Pixels scrolled per step.
    #[arg(long, default_value_t = 600)]
    pub scroll_step: u32,

    /// Maximum number of scroll steps.
    #[arg(long, short = 's', default_value_t = 20)]
    pub steps: u32,

    /// Seed for the placeholder dimensions.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Stop the feed after this many pages (overrides the configuration).
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Make every fetch of this page fail.
    #[arg(long)]
    pub fail_page: Option<u32>,

    /// Output in JSON format instead of a table.
    #[arg(long, short = 'j')]
    pub json: bool,
}

/// Outcome of a simulated scroll session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub steps: u32,
    pub stats: SessionStats,
    pub pins: usize,
    pub page: u32,
    pub column_count: usize,
    pub total_height: u32,
    pub footer: Footer,
    pub error: Option<String>,
}

/// Runs the simulation on a single-threaded runtime.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built or the session cannot
/// observe the simulated viewport.
pub fn run_simulation(
    args: &SimulateArgs,
    config: &PinboardConfig,
) -> Result<SimulationReport, PinboardError> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    runtime.block_on(simulate(args, config))
}

async fn simulate(
    args: &SimulateArgs,
    config: &PinboardConfig,
) -> Result<SimulationReport, PinboardError> {
    let source = PlaceholderSource::new(args.seed)
        .with_max_pages(args.max_pages.or(config.feed.max_pages))
        .with_failing_page(args.fail_page);

    let mut session = FeedSession::new(source, config, args.width);
    let host = ChannelHost::new();
    session.attach(&host)?;
    let snapshots = session.subscribe();

    let (stats, steps) = tokio::join!(session.run(), scroll(host, snapshots, args));
    let snapshot = session.snapshot();

    Ok(SimulationReport {
        steps,
        stats,
        pins: snapshot.frames.len(),
        page: snapshot.page,
        column_count: snapshot.column_count,
        total_height: snapshot.total_height,
        footer: snapshot.footer,
        error: snapshot.error,
    })
}

/// Scripted scroller. Dropping `host` at the end stops the session.
async fn scroll(host: ChannelHost, snapshots: Subscriber<GridSnapshot>, args: &SimulateArgs) -> u32 {
    host.emit(ViewportEvent::Resize(args.width));

    let mut scroll_y: u32 = 0;
    let mut steps = 0;

    while steps < args.steps {
        // Let the session drain what was emitted so far.
        tokio::task::yield_now().await;

        let snapshot = snapshots.get();
        if snapshot.footer == Footer::EndOfContent {
            break;
        }

        let max_scroll = snapshot.total_height.saturating_sub(args.viewport_height);
        scroll_y = scroll_y.saturating_add(args.scroll_step).min(max_scroll);
        let visible = sentinel_visible(snapshot.total_height, scroll_y, args.viewport_height);

        tracing::trace!(step = steps, scroll_y, visible, "simulate: scrolled");
        host.emit(ViewportEvent::Visibility(visible));
        steps += 1;
    }

    tokio::task::yield_now().await;
    steps
}

/// The sentinel sits right below the tallest column.
const fn sentinel_visible(total_height: u32, scroll_y: u32, viewport_height: u32) -> bool {
    total_height <= scroll_y.saturating_add(viewport_height)
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the simulation cannot run.
pub fn execute(args: &SimulateArgs) -> Result<(), PinboardError> {
    #[derive(Tabled)]
    struct MetricRow {
        #[tabled(rename = "Metric")]
        name: &'static str,
        #[tabled(rename = "Value")]
        value: String,
    }

    let report = run_simulation(args, config::get_config())?;

    if args.json {
        return output::print_json(&report);
    }

    let footer = match report.footer {
        Footer::Idle => "idle".to_string(),
        Footer::Loading => "loading".yellow().to_string(),
        Footer::EndOfContent => "end of content".cyan().to_string(),
    };

    let exhausted = if report.footer == Footer::EndOfContent {
        "yes".cyan().to_string()
    } else {
        "no".dimmed().to_string()
    };

    let rows = vec![
        MetricRow { name: "Steps", value: report.steps.to_string() },
        MetricRow { name: "Load-more signals", value: report.stats.signals.to_string() },
        MetricRow { name: "Pages fetched", value: report.stats.pages.to_string() },
        MetricRow { name: "Failed fetches", value: report.stats.failures.to_string() },
        MetricRow { name: "Pins", value: report.pins.to_string() },
        MetricRow { name: "Next page", value: report.page.to_string() },
        MetricRow { name: "Columns", value: report.column_count.to_string() },
        MetricRow { name: "Total height", value: format!("{}px", report.total_height) },
        MetricRow { name: "Footer", value: footer },
        MetricRow { name: "Exhausted", value: exhausted },
    ];

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()))
        .to_string();

    println!("{}", "Simulation".bold());
    println!("{table}");

    if let Some(error) = &report.error {
        println!("{} {error}", "Last error:".red());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SimulateArgs {
        SimulateArgs {
            width: 904,
            viewport_height: 800,
            scroll_step: 600,
            steps: 20,
            seed: 3,
            max_pages: None,
            fail_page: None,
            json: false,
        }
    }

    #[test]
    fn test_sentinel_visible_at_bottom() {
        assert!(sentinel_visible(0, 0, 800));
        assert!(sentinel_visible(1000, 200, 800));
        assert!(!sentinel_visible(1001, 200, 800));
    }

    #[test]
    fn test_simulation_runs_until_feed_is_exhausted() {
        let mut limited = args();
        limited.max_pages = Some(3);
        limited.steps = 200;

        let report = run_simulation(&limited, &PinboardConfig::default()).unwrap();

        assert_eq!(report.footer, Footer::EndOfContent);
        assert_eq!(report.pins, 60);
        assert_eq!(report.column_count, 3);
        assert_eq!(report.stats.failures, 0);
        assert!(report.steps < 200);
    }

    #[test]
    fn test_simulation_reports_failed_page() {
        let mut failing = args();
        failing.fail_page = Some(2);
        failing.steps = 10;

        let report = run_simulation(&failing, &PinboardConfig::default()).unwrap();

        assert!(report.stats.failures >= 1);
        assert_eq!(report.pins, 20);
        assert_eq!(report.page, 2);
        assert!(report.error.unwrap().contains("page 2"));
    }

    #[test]
    fn test_simulation_with_zero_steps_loads_first_page_only() {
        let mut idle = args();
        idle.steps = 0;

        let report = run_simulation(&idle, &PinboardConfig::default()).unwrap();

        assert_eq!(report.steps, 0);
        assert_eq!(report.pins, 20);
        assert_eq!(report.stats.signals, 0);
        assert_eq!(report.footer, Footer::Idle);
    }
}
