//! Evolugrid CLI
//!
//! Loads grid options from a JSON file, fetches from the endpoint and prints
//! the rendered grid as HTML.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use evolugrid_lib::Grid;
use evolugrid_lib::Outcome;
use evolugrid_lib::descriptor::GridOptions;
use evolugrid_lib::filter::FilterEntry;
use evolugrid_lib::host::Controls;
use evolugrid_lib::host::Host;
use evolugrid_lib::transport::HttpTransport;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TermLogger;
use simplelog::TerminalMode;

/// Selector the CLI's filters are served under when the options name no form.
const CLI_FORM: &str = "cli";

#[derive(Debug, Parser)]
#[command(name = "evolugrid", version, about = "Fetch and render a data grid")]
struct Args {
    /// Grid options as a JSON file.
    options: PathBuf,

    /// Base URL relative endpoints resolve against.
    #[arg(long, env = "EVOLUGRID_BASE_URL")]
    base_url: Option<String>,

    /// Zero-based page to render in paging mode.
    #[arg(long, default_value_t = 0)]
    page: u64,

    /// Filter as `name=value`; repeatable.
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<FilterEntry>,

    /// Boundary events to simulate after the first rows in scroll mode.
    #[arg(long, default_value_t = 0)]
    scroll_pages: u32,

    /// Open the CSV export instead of rendering.
    #[arg(long)]
    csv: bool,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] evolugrid_lib::error::ConfigError),

    #[error(transparent)]
    Transport(#[from] evolugrid_lib::error::TransportError),

    #[error(transparent)]
    Grid(#[from] evolugrid_lib::Error),
}

fn parse_filter(arg: &str) -> Result<FilterEntry, String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok(FilterEntry::new(name, value)),
        _ => Err(format!("expected name=value, got `{arg}`")),
    }
}

/// Host backed by the terminal: the filter form is the `--filter` list.
struct TerminalHost {
    filters: Vec<FilterEntry>,
}

impl Host for TerminalHost {
    fn serialize_form(&self, _selector: &str) -> Vec<FilterEntry> {
        self.filters.clone()
    }

    fn set_controls_enabled(&self, controls: Controls<'_>, enabled: bool) {
        log::trace!("controls {controls:?} enabled={enabled}");
    }

    fn set_loader_visible(&self, selector: &str, visible: bool) {
        log::debug!("loader {selector} visible={visible}");
    }

    fn set_count(&self, selector: &str, count: Option<u64>) {
        match count {
            Some(count) => log::info!("{selector}: {count} rows"),
            None => log::info!("{selector}: total unknown"),
        }
    }

    fn open_url(&self, url: &str) {
        if let Err(e) = open::that(url) {
            log::warn!("failed to open {url}: {e}");
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("logging disabled: {e}");
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let text = fs::read_to_string(&args.options).map_err(|source| CliError::Read {
        path: args.options.clone(),
        source,
    })?;
    let mut options = GridOptions::from_json(serde_json::from_str(&text)?)?.load_on_init(false);

    let settings = options.settings();
    if !args.filters.is_empty() && settings.get("filterFormSelector").is_none() {
        options = options.filter_form_selector(CLI_FORM);
    }
    let infinite_scroll = settings
        .get("infiniteScroll")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let mut transport = HttpTransport::builder();
    if let Some(base_url) = &args.base_url {
        transport = transport.base_url(base_url)?;
    }
    if let Some(secs) = args.timeout {
        transport = transport.timeout(Duration::from_secs(secs));
    }

    let host = Arc::new(TerminalHost { filters: args.filters });
    let grid = Grid::new(options, host, Arc::new(transport.build()))?;

    if args.csv {
        println!("{}", grid.export_csv(None).await);
        return Ok(());
    }

    if infinite_scroll {
        grid.scroll(true).await?;
        for _ in 0..args.scroll_pages {
            if grid.on_boundary_reached().await? == Outcome::Exhausted {
                break;
            }
        }
    } else {
        grid.refresh(args.page, None).await?;
    }

    println!("{}", grid.html().await);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
