use super::{FetchFailure, FetchOutcome, FetchReport, FetchTool};
use crate::error::{Error, FetchError};
use crate::model::FetchTarget;
use crate::progress::ProgressReporter;
use rayon::ThreadPoolBuilder;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, error, info};

/// Run `tool` over every target on a pool of at most `concurrency` workers.
///
/// Workers pull targets in submission order. A recoverable failure (or a
/// panic inside the tool) is recorded and the worker moves on. A fatal
/// failure stops every worker from starting another target; targets that
/// were already running finish normally and the rest are reported as skipped.
///
/// Blocks until the pool drains.
pub fn execute<T>(
    targets: &[FetchTarget],
    concurrency: usize,
    tool: &T,
    reporter: &dyn ProgressReporter,
) -> Result<FetchReport, Error>
where
    T: FetchTool + ?Sized,
{
    let start = Instant::now();
    let total = targets.len();
    let workers = concurrency.max(1).min(total.max(1));

    reporter.on_fetch_start(total);
    info!("Fetching {} items with {} workers", total, workers);

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("fetch-worker-{}", i))
        .build()
        .map_err(|e| Error::Other(format!("Unable to start fetch workers: {}", e)))?;

    let next = AtomicUsize::new(0);
    let done = AtomicUsize::new(0);
    let halted = AtomicBool::new(false);
    let outcomes: Mutex<Vec<Option<FetchOutcome>>> = Mutex::new(vec![None; total]);

    pool.scope(|s| {
        for _ in 0..workers {
            s.spawn(|_| loop {
                if halted.load(Ordering::SeqCst) {
                    break;
                }
                let index = next.fetch_add(1, Ordering::SeqCst);
                let Some(target) = targets.get(index) else {
                    break;
                };

                debug!("Fetching {}", target);
                let outcome = FetchOutcome::from(run_isolated(tool, target));
                match &outcome {
                    FetchOutcome::Fatal(reason) => {
                        error!("Fetch tool failure on {}: {}", target, reason);
                        halted.store(true, Ordering::SeqCst);
                    }
                    FetchOutcome::Failed(reason) => {
                        error!("Could not fetch {}: {}", target, reason);
                    }
                    _ => debug!("Fetched {}", target),
                }

                let finished = done.fetch_add(1, Ordering::SeqCst) + 1;
                reporter.on_fetch_item_finished(target, &outcome, finished, total);

                if let Ok(mut slots) = outcomes.lock() {
                    slots[index] = Some(outcome);
                }
            });
        }
    });

    let outcomes = outcomes
        .into_inner()
        .map_err(|_| Error::Other("Fetch worker state was poisoned".to_string()))?;

    let mut report = FetchReport {
        total,
        ..FetchReport::default()
    };
    for (target, outcome) in targets.iter().zip(outcomes) {
        match outcome.unwrap_or(FetchOutcome::Skipped) {
            FetchOutcome::Fetched => report.fetched.push(target.clone()),
            FetchOutcome::Failed(reason) => report.failures.push(FetchFailure {
                target: target.clone(),
                reason,
            }),
            FetchOutcome::Fatal(reason) => {
                let failure = FetchFailure {
                    target: target.clone(),
                    reason,
                };
                if report.fatal.is_none() {
                    report.fatal = Some(failure);
                } else {
                    report.failures.push(failure);
                }
            }
            FetchOutcome::Skipped => report.skipped.push(target.clone()),
        }
    }
    report.duration = start.elapsed();

    debug!(
        "Fetch completed in {:.2}s: {} fetched, {} failed, {} skipped",
        report.duration.as_secs_f64(),
        report.fetched.len(),
        report.failures.len(),
        report.skipped.len(),
    );
    reporter.on_fetch_complete(&report);

    Ok(report)
}

fn run_isolated<T>(tool: &T, target: &FetchTarget) -> Result<(), FetchError>
where
    T: FetchTool + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| tool.fetch(target))) {
        Ok(result) => result,
        Err(payload) => Err(FetchError::Recoverable(format!(
            "fetch panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
