//! Feeds the alert list from the occurrence API.

use sentinela_core::AlertList;
use tracing::warn;

use crate::OccurrenceApi;

/// Fetch the list and replace `list` with the response.
///
/// A failed fetch leaves an empty list; the screen has no separate error state.
pub async fn load_alerts<A: OccurrenceApi + ?Sized>(api: &A, list: &mut AlertList) -> usize {
    match api.list_occurrences().await {
        Ok(occurrences) => list.replace(occurrences),
        Err(e) => {
            warn!(error = %e, "failed to load alerts");
            list.replace(Vec::new());
        }
    }
    list.len()
}

/// Load on first display only. Returns `false` when the list was already loaded.
pub async fn load_alerts_once<A: OccurrenceApi + ?Sized>(api: &A, list: &mut AlertList) -> bool {
    if !list.needs_load() {
        return false;
    }
    load_alerts(api, list).await;
    true
}
