mod cli;
mod logging;
mod reporter;

use std::env;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use dotenv::dotenv;
use reporter::CliReporter;
use tracing::{error, info};
use tube_sync::fetch::YtDlpTool;
use tube_sync::remote::{DataApiLister, FlatPlaylistLister, RemoteLister};
use tube_sync::{Error, ListerKind, SyncEngine, SyncOptions, SyncResult};

/// Destination not writable, bad configuration, remote listing failure.
const EXIT_FAILURE: i32 = 1;
/// The fetch tool itself is broken.
const EXIT_FETCH_TOOL: i32 = 2;

fn main() {
    dotenv().ok();

    let args = Cli::parse();
    let guard = logging::init_logger(args.verbose);

    let config = match tube_sync::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            drop(guard);
            process::exit(EXIT_FAILURE);
        }
    };

    let options = args.into_options(&config);
    let code = match run_sync(options) {
        Ok(()) => 0,
        Err(err) => {
            error!("{:#}", err);
            match err.downcast_ref::<Error>() {
                Some(Error::FatalFetchEnvironment(_)) => EXIT_FETCH_TOOL,
                _ => EXIT_FAILURE,
            }
        }
    };

    drop(guard);
    process::exit(code);
}

fn run_sync(options: SyncOptions) -> Result<()> {
    let lister = build_lister(&options)?;
    let tool = YtDlpTool::from_options(&options);
    let engine = SyncEngine::new(options, lister, Box::new(tool));

    let reporter = CliReporter::new();
    let result = engine.sync(&reporter)?;
    print_summary(engine.options(), &result);

    Ok(())
}

fn build_lister(options: &SyncOptions) -> Result<Box<dyn RemoteLister>> {
    let lister: Box<dyn RemoteLister> = match options.lister {
        ListerKind::Api => {
            let api_key = env::var("YOUTUBE_KEY")
                .context("YOUTUBE_KEY must be set (or in .env) to list playlists through the API")?;
            Box::new(DataApiLister::new(api_key))
        }
        ListerKind::FetchTool => Box::new(FlatPlaylistLister::new(options.fetch_tool.clone())),
    };
    Ok(lister)
}

fn print_summary(options: &SyncOptions, result: &SyncResult) {
    println!();
    for line in summary_lines(options, result) {
        info!("{}", line);
    }
}

/// Plain text only: these go through `info!` into the file log as well.
fn summary_lines(options: &SyncOptions, result: &SyncResult) -> Vec<String> {
    let mut lines = vec![format!(
        "{} local files, {} remote videos, {} already synced",
        result.local_files, result.remote_items, result.plan.already_present,
    )];

    if options.dry_run {
        lines.push(format!(
            "Dry run: would download {} and remove {}",
            result.plan.to_fetch.len(),
            result.plan.to_remove.len(),
        ));
        return lines;
    }

    if let Some(fetch) = &result.fetch {
        lines.push(format!(
            "Downloaded {}, failed {} in {:.2}s",
            fetch.fetched.len(),
            fetch.failures.len(),
            fetch.duration.as_secs_f64(),
        ));
        for failure in &fetch.failures {
            lines.push(format!(" - {}: {}", failure.target.title, failure.reason));
        }
    }

    if let Some(deletion) = &result.deletion {
        lines.push(format!(
            "Deleted {}, already gone {}, failed {}",
            deletion.deleted.len(),
            deletion.missing.len(),
            deletion.failed.len(),
        ));
    }

    lines
}
