// Metrics hooks for the `matcher` crate.
//
// Callers install a global `MatchMetrics` implementation via [`set_match_metrics`];
// `IngredientMatcher::classify` then reports latency and result counts for every
// ingredient it classifies. The crate itself stays independent of any metrics
// backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::MatchType;

/// Metrics observer for classification calls.
pub trait MatchMetrics: Send + Sync {
    /// Record one classified ingredient.
    ///
    /// `household_id` is the taxonomy scope of the request, `best` the tier of
    /// the top-ranked match (if any), `latency` the wall-clock time spent, and
    /// `match_count` the number of matches returned.
    fn record_match(
        &self,
        household_id: Option<&str>,
        best: Option<MatchType>,
        latency: Duration,
        match_count: usize,
    );
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
///
/// Usually called once at service startup.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
