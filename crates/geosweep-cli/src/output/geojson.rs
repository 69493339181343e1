//! GeoJSON projection of location records.

use geosweep_core::LocationRecord;
use serde_json::{json, Value};

/// `FeatureCollection` with one `Point` per record that has both coordinates.
///
/// Each feature carries the whole record, unknown fields included, as its
/// `properties`.
pub(crate) fn feature_collection(records: &[LocationRecord]) -> Value {
    let features: Vec<Value> = records
        .iter()
        .filter_map(|record| {
            let (lng, lat) = record.position()?;
            let properties = serde_json::to_value(record).ok()?;
            Some(json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [lng, lat]
                },
                "properties": properties
            }))
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> LocationRecord {
        LocationRecord::from_value(value).unwrap()
    }

    #[test]
    fn builds_point_features_in_lng_lat_order() {
        let record = record(json!({
            "external_id": 9,
            "name": "Park",
            "lat": 40.5,
            "lng": -73.25,
            "category": "park",
            "address": null
        }));

        let collection = feature_collection(&[record]);
        assert_eq!(collection["type"], "FeatureCollection");
        let feature = &collection["features"][0];
        assert_eq!(feature["geometry"]["coordinates"], json!([-73.25, 40.5]));
        assert_eq!(feature["properties"]["external_id"], json!(9));
        assert_eq!(feature["properties"]["category"], json!("park"));
        assert!(feature["properties"]
            .as_object()
            .is_some_and(|p| p.get("address") == Some(&Value::Null)));
    }

    #[test]
    fn skips_records_without_coordinates() {
        let no_lng = record(json!({"external_id": 1, "lat": 1.0}));
        let text_lng = record(json!({"external_id": 2, "lat": 1.0, "lng": "east"}));
        let collection = feature_collection(&[no_lng, text_lng, LocationRecord::default()]);
        assert_eq!(collection["features"], json!([]));
    }
}
