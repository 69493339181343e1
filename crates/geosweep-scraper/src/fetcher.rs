//! The single-point fetch seam used by the expansion engine.

use std::future::Future;

use geosweep_core::{Credentials, LocationRecord, QueryPoint};

use crate::client::LocationClient;

/// Fetches the raw location records around one coordinate.
///
/// Implementations never fail: any transport, status or decode problem is
/// logged and reported as an empty list, so one bad grid cell cannot abort
/// an expansion.
pub trait LocationFetcher {
    fn fetch(
        &self,
        point: QueryPoint,
        credentials: &Credentials,
    ) -> impl Future<Output = Vec<LocationRecord>> + Send;
}

impl LocationFetcher for LocationClient {
    async fn fetch(&self, point: QueryPoint, credentials: &Credentials) -> Vec<LocationRecord> {
        match self.fetch_locations(point, credentials).await {
            Ok(records) => {
                tracing::debug!(
                    lat = point.lat,
                    lng = point.lng,
                    count = records.len(),
                    "fetched locations"
                );
                records
            }
            Err(error) => {
                tracing::warn!(
                    lat = point.lat,
                    lng = point.lng,
                    %error,
                    "location fetch failed; using empty result"
                );
                Vec::new()
            }
        }
    }
}

