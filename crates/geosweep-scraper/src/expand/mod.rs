//! Fuzzy expansion around a target coordinate.
//!
//! A single location query returns a small, biased sample. The expander
//! seeds from one center query, lays a grid scaled by the spread of that
//! sample around the target, queries every grid cell with bounded
//! concurrency and folds the answers into one deduplicated list.

mod grid;
mod merge;

pub use grid::{grid_offsets, grid_points, Spread};
pub use merge::{DedupIndex, ExpansionResult, ExpansionStats};

use futures::stream::{self, StreamExt};
use geosweep_core::{Credentials, SearchParams};

use crate::fetcher::LocationFetcher;

/// Runs fuzzy expansions through a [`LocationFetcher`].
pub struct FuzzyExpander<F> {
    fetcher: F,
    max_concurrent: usize,
}

impl<F: LocationFetcher> FuzzyExpander<F> {
    /// `max_concurrent` bounds the number of grid fetches in flight; values
    /// below 1 are treated as 1.
    pub fn new(fetcher: F, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            max_concurrent: max_concurrent.max(1),
        }
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Expands around `params.center`.
    ///
    /// The center query always runs first and its records lead the result in
    /// their original order, even when it comes back empty. Grid cells are
    /// then fetched concurrently and merged on this task as they complete, so
    /// grid-sourced records appear in completion order. A failed cell simply
    /// contributes nothing.
    pub async fn expand(&self, params: &SearchParams, credentials: &Credentials) -> ExpansionResult {
        let center = self.fetcher.fetch(params.center, credentials).await;
        let spread = Spread::of(&center);
        let mut result = ExpansionResult::seeded(center);

        let points = grid_points(params.center, spread, params.radius);
        result.set_grid_queries(points.len());
        tracing::debug!(
            lat = params.center.lat,
            lng = params.center.lng,
            radius = params.radius,
            spread_lat = spread.lat,
            spread_lng = spread.lng,
            center_records = result.len(),
            grid_queries = points.len(),
            "expanding location search"
        );

        let mut completed = stream::iter(points)
            .map(|point| self.fetcher.fetch(point, credentials))
            .buffer_unordered(self.max_concurrent);

        while let Some(records) = completed.next().await {
            result.merge(records);
        }

        let stats = result.stats();
        tracing::info!(
            lat = params.center.lat,
            lng = params.center.lng,
            total = result.len(),
            center_records = stats.center_records,
            grid_queries = stats.grid_queries,
            grid_added = stats.grid_added,
            duplicates_dropped = stats.duplicates_dropped,
            missing_id_dropped = stats.missing_id_dropped,
            "location expansion complete"
        );

        result
    }
}

#[cfg(test)]
#[path = "../expand_test.rs"]
mod tests;
