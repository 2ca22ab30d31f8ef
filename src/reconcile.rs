use crate::matcher::{strip_extension, within_threshold};
use crate::model::RemoteItem;
use rayon::prelude::*;
use tracing::debug;

/// Remote items with no local file within `threshold` edits, in remote order.
pub fn compute_fetch_set<S>(
    local_keys: &[S],
    remote_items: &[RemoteItem],
    threshold: usize,
) -> Vec<RemoteItem>
where
    S: AsRef<str> + Sync,
{
    remote_items
        .par_iter()
        .filter(|item| !within_threshold(&item.title, local_keys, threshold))
        .cloned()
        .collect()
}

/// Local filenames whose stripped key has no remote title within `threshold`
/// edits, in local order.
pub fn compute_remove_set<F, T>(
    local_filenames: &[F],
    remote_titles: &[T],
    threshold: usize,
) -> Vec<String>
where
    F: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    local_filenames
        .par_iter()
        .map(|f| f.as_ref())
        .filter(|f| !within_threshold(strip_extension(f), remote_titles, threshold))
        .map(str::to_string)
        .collect()
}

/// Everything one run has to do, computed up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub to_fetch: Vec<RemoteItem>,
    pub to_remove: Vec<String>,
    pub already_present: usize,
}

impl SyncPlan {
    pub fn build(local_filenames: &[String], remote_items: &[RemoteItem], threshold: usize) -> Self {
        let local_keys: Vec<&str> = local_filenames.iter().map(|f| strip_extension(f)).collect();
        let remote_titles: Vec<&str> = remote_items.iter().map(|v| v.title.as_str()).collect();

        let to_fetch = compute_fetch_set(&local_keys, remote_items, threshold);
        let to_remove = compute_remove_set(local_filenames, &remote_titles, threshold);
        let already_present = remote_items.len() - to_fetch.len();

        debug!(
            "Plan: {} to fetch, {} to remove, {} already present (threshold={})",
            to_fetch.len(),
            to_remove.len(),
            already_present,
            threshold,
        );

        Self {
            to_fetch,
            to_remove,
            already_present,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_fetch.is_empty() && self.to_remove.is_empty()
    }
}
