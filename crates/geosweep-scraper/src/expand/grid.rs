//! Expansion grid derived from the spread of the center sample.
//!
//! Offsets are integer multiples of the population standard deviation of the
//! center results, so the grid stretches to match how densely the upstream
//! service packs locations around the target.

use std::collections::HashSet;

use geosweep_core::{LocationRecord, QueryPoint};

/// Population standard deviation of the center sample, per axis, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spread {
    pub lat: f64,
    pub lng: f64,
}

impl Spread {
    /// Spread of the records' latitudes and longitudes. Each axis only counts
    /// records where that coordinate is present.
    #[must_use]
    pub fn of(records: &[LocationRecord]) -> Self {
        Self {
            lat: population_std_dev(records.iter().filter_map(LocationRecord::lat)),
            lng: population_std_dev(records.iter().filter_map(LocationRecord::lng)),
        }
    }
}

/// Population standard deviation. An empty sample has a deviation of zero.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn population_std_dev(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Integer offset pairs covering `[-radius, radius]²`, row by row, without `(0, 0)`.
#[must_use]
pub fn grid_offsets(radius: u32) -> Vec<(i64, i64)> {
    let r = i64::from(radius);
    (-r..=r)
        .flat_map(|d_lat| (-r..=r).map(move |d_lng| (d_lat, d_lng)))
        .filter(|&offset| offset != (0, 0))
        .collect()
}

/// Query points for every grid offset around `center`.
///
/// Points that land exactly on the center, or on a point already produced,
/// are dropped. That only happens when an axis has zero spread; otherwise
/// the result has `(2r + 1)² - 1` distinct points.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_points(center: QueryPoint, spread: Spread, radius: u32) -> Vec<QueryPoint> {
    let mut seen = HashSet::new();
    seen.insert(point_key(center));

    grid_offsets(radius)
        .into_iter()
        .map(|(d_lat, d_lng)| {
            QueryPoint::new(
                center.lat + d_lat as f64 * spread.lat,
                center.lng + d_lng as f64 * spread.lng,
            )
        })
        .filter(|point| seen.insert(point_key(*point)))
        .collect()
}

/// Bit-exact identity for a point. Adding `0.0` folds `-0.0` into `0.0`.
fn point_key(point: QueryPoint) -> (u64, u64) {
    ((point.lat + 0.0).to_bits(), (point.lng + 0.0).to_bits())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;

    fn record(lat: Option<f64>, lng: Option<f64>) -> LocationRecord {
        let mut fields = Map::new();
        if let Some(lat) = lat {
            fields.insert("lat".to_owned(), json!(lat));
        }
        if let Some(lng) = lng {
            fields.insert("lng".to_owned(), json!(lng));
        }
        LocationRecord::from(fields)
    }

    #[test]
    fn offsets_have_expected_cardinality() {
        assert_eq!(grid_offsets(0).len(), 0);
        assert_eq!(grid_offsets(1).len(), 8);
        assert_eq!(grid_offsets(2).len(), 24);
        assert_eq!(grid_offsets(3).len(), 48);
    }

    #[test]
    fn offsets_exclude_origin_and_stay_in_range() {
        let offsets = grid_offsets(2);
        assert!(!offsets.contains(&(0, 0)));
        assert!(offsets
            .iter()
            .all(|&(a, b)| (-2..=2).contains(&a) && (-2..=2).contains(&b)));
        let unique: HashSet<_> = offsets.iter().collect();
        assert_eq!(unique.len(), offsets.len());
    }

    #[test]
    fn std_dev_of_empty_sample_is_zero() {
        assert!(population_std_dev(std::iter::empty()).abs() < f64::EPSILON);
    }

    #[test]
    fn std_dev_uses_population_formula() {
        // Sample deviation of [2, 4] would be sqrt(2); population deviation is 1.
        let sd = population_std_dev([2.0, 4.0].into_iter());
        assert!((sd - 1.0).abs() < 1e-12, "got {sd}");
    }

    #[test]
    fn spread_ignores_missing_coordinates() {
        let records = vec![
            record(Some(40.0), Some(-73.0)),
            record(Some(40.001), None),
            record(None, Some(-73.002)),
        ];
        let spread = Spread::of(&records);
        assert!((spread.lat - 0.0005).abs() < 1e-9, "lat {}", spread.lat);
        assert!((spread.lng - 0.001).abs() < 1e-9, "lng {}", spread.lng);
    }

    #[test]
    fn spread_skips_non_numeric_coordinates() {
        let records = vec![
            record(Some(40.0), Some(-73.0)),
            LocationRecord::from_value(json!({"lat": "41.0", "lng": null})).unwrap(),
            record(Some(40.002), Some(-73.0)),
        ];
        let spread = Spread::of(&records);
        assert!((spread.lat - 0.001).abs() < 1e-9, "lat {}", spread.lat);
        assert!(spread.lng.abs() < f64::EPSILON);
    }

    #[test]
    fn grid_points_scale_offsets_by_spread() {
        let center = QueryPoint::new(10.0, 20.0);
        let spread = Spread { lat: 0.5, lng: 0.25 };
        let points = grid_points(center, spread, 2);

        assert_eq!(points.len(), 24);
        assert!(!points.contains(&center));
        assert!(points.contains(&QueryPoint::new(9.0, 19.5)));
        assert!(points.contains(&QueryPoint::new(11.0, 20.5)));
        assert!(points.contains(&QueryPoint::new(10.0, 20.25)));
    }

    #[test]
    fn zero_spread_collapses_grid() {
        let center = QueryPoint::new(40.0, -73.0);
        assert!(grid_points(center, Spread::default(), 2).is_empty());
    }

    #[test]
    fn zero_spread_on_one_axis_removes_duplicates() {
        let center = QueryPoint::new(40.0, -73.0);
        let spread = Spread { lat: 0.0, lng: 0.01 };
        let points = grid_points(center, spread, 2);

        // Only the longitude offsets survive: -2, -1, 1, 2.
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| (p.lat - 40.0).abs() < f64::EPSILON));
    }

    #[test]
    fn zero_radius_has_no_points() {
        let spread = Spread { lat: 1.0, lng: 1.0 };
        assert!(grid_points(QueryPoint::new(0.0, 0.0), spread, 0).is_empty());
    }
}
