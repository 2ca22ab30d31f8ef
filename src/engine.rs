use crate::cleanup::{self, DeletionReport};
use crate::config::SyncOptions;
use crate::error::Error;
use crate::fetch::{self, FetchReport, FetchTool};
use crate::model::{FetchTarget, RemoteItem};
use crate::progress::ProgressReporter;
use crate::reconcile::SyncPlan;
use crate::remote::RemoteLister;
use crate::scanner;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct SyncEngine {
    options: SyncOptions,
    lister: Box<dyn RemoteLister>,
    tool: Box<dyn FetchTool>,
}

#[derive(Debug)]
pub struct SyncResult {
    pub local_files: usize,
    pub remote_items: usize,
    pub plan: SyncPlan,
    /// `None` when nothing had to be fetched or the run was a dry run.
    pub fetch: Option<FetchReport>,
    /// `None` when nothing had to be deleted, or deletion was disabled.
    pub deletion: Option<DeletionReport>,
    pub listing_duration: Duration,
}

impl SyncEngine {
    pub fn new(
        options: SyncOptions,
        lister: Box<dyn RemoteLister>,
        tool: Box<dyn FetchTool>,
    ) -> Self {
        Self {
            options,
            lister,
            tool,
        }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Run one full reconciliation:
    /// 1. Check the destination is writable (no side effects before this)
    /// 2. Scan local files and list the remote playlist
    /// 3. Compute the fetch and remove sets
    /// 4. Fetch missing items on the worker pool
    /// 5. Delete local files no longer in the playlist
    ///
    /// Dry runs stop after step 3. A fatal fetch-tool failure returns
    /// [`Error::FatalFetchEnvironment`] and skips step 5.
    pub fn sync(&self, reporter: &dyn ProgressReporter) -> Result<SyncResult, Error> {
        let options = &self.options;
        scanner::ensure_writable(&options.dest)?;

        info!("Getting local playlist information...");
        let local_files = scanner::scan_local_files(&options.dest, &options.extension)?;
        reporter.on_scan_complete(local_files.len());
        debug!("Files in local playlist {}:", options.dest.display());
        for file in &local_files {
            debug!(" - {}", file);
        }

        info!("Pulling remote playlist information...");
        reporter.on_listing_start(&options.playlist);
        let listing_start = Instant::now();
        let remote_items = self.lister.list(&options.playlist)?;
        let listing_duration = listing_start.elapsed();
        reporter.on_listing_complete(remote_items.len(), listing_duration.as_secs_f64());
        debug!("Videos in remote playlist {}:", options.playlist);
        for item in &remote_items {
            debug!(" - {}", item.title);
        }

        let plan = SyncPlan::build(&local_files, &remote_items, options.threshold);

        let fetch = self.fetch_missing(&plan.to_fetch, reporter)?;
        let deletion = self.remove_stale(&plan.to_remove, reporter);

        Ok(SyncResult {
            local_files: local_files.len(),
            remote_items: remote_items.len(),
            plan,
            fetch,
            deletion,
            listing_duration,
        })
    }

    fn fetch_missing(
        &self,
        to_fetch: &[RemoteItem],
        reporter: &dyn ProgressReporter,
    ) -> Result<Option<FetchReport>, Error> {
        if to_fetch.is_empty() {
            info!("Nothing new to download");
            return Ok(None);
        }

        info!("Have to download:");
        for item in to_fetch {
            info!(" - {}", item.title);
        }
        if self.options.dry_run {
            info!("Not downloading. To download drop the --dont-update flag");
            return Ok(None);
        }

        self.tool
            .check_environment()
            .map_err(|e| Error::FatalFetchEnvironment(e.to_string()))?;

        let targets: Vec<FetchTarget> = to_fetch.iter().map(RemoteItem::to_fetch_target).collect();
        let report = fetch::execute(
            &targets,
            self.options.concurrency,
            self.tool.as_ref(),
            reporter,
        )?;

        if let Some(fatal) = &report.fatal {
            return Err(Error::FatalFetchEnvironment(fatal.reason.clone()));
        }
        Ok(Some(report))
    }

    fn remove_stale(
        &self,
        to_remove: &[String],
        reporter: &dyn ProgressReporter,
    ) -> Option<DeletionReport> {
        if to_remove.is_empty() {
            info!("All files are still in remote playlist");
            return None;
        }

        info!("These files are no longer in remote playlist:");
        for file in to_remove {
            info!(" - {}", file);
        }
        if self.options.keep || self.options.dry_run {
            info!("To delete them don't use the --keep or the --dont-update option");
            return None;
        }

        info!("Deleting them");
        reporter.on_delete_start(to_remove.len());
        let report = cleanup::delete_files(&self.options.dest, to_remove);
        reporter.on_delete_complete(report.deleted.len(), report.missing.len());
        Some(report)
    }
}
