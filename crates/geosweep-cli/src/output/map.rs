//! Standalone Leaflet map of the results.

use geosweep_core::{LocationRecord, QueryPoint};

use super::{feature_collection, LOCATION_PAGE_BASE};

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Location sweep</title>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
    <style>
      html, body { height: 100%; margin: 0; }
      #map { width: 100%; height: 100%; }
      img.search-center { filter: hue-rotate(120deg); z-index: 999 !important; }
    </style>
  </head>
  <body>
    <div id="map"></div>
    <script>
      const center = [__LAT__, __LNG__];
      const locations = __LOCATIONS__;
      const pageBase = __PAGE_BASE__;
      const dateSuffix = __DATE_SUFFIX__;

      const map = L.map("map").setView(center, 14);
      L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
        maxZoom: 18,
        attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors',
      }).addTo(map);

      function text(value) {
        const node = document.createElement("span");
        node.textContent = value == null ? "" : String(value);
        return node.innerHTML;
      }

      L.geoJSON(locations, {
        onEachFeature(feature, layer) {
          const props = feature.properties;
          const href = pageBase + encodeURIComponent(props.external_id) + dateSuffix;
          layer.bindPopup(
            '<a href="' + href + '" target="_blank">' + text(props.name) + "</a><br />" + text(props.address)
          );
        },
      }).addTo(map);

      const marker = L.marker(center).addTo(map);
      marker._icon.classList.add("search-center");
    </script>
  </body>
</html>
"#;

/// Renders the HTML map centred on the search coordinate.
///
/// # Errors
///
/// Returns an error if the embedded values cannot be serialized.
pub(crate) fn render_map(
    center: QueryPoint,
    records: &[LocationRecord],
    date_suffix: &str,
) -> anyhow::Result<String> {
    let locations = script_safe(&serde_json::to_string(&feature_collection(records))?);
    let page_base = serde_json::to_string(LOCATION_PAGE_BASE)?;
    let date_suffix = script_safe(&serde_json::to_string(date_suffix)?);

    Ok(TEMPLATE
        .replace("__LAT__", &center.lat.to_string())
        .replace("__LNG__", &center.lng.to_string())
        .replace("__PAGE_BASE__", &page_base)
        .replace("__DATE_SUFFIX__", &date_suffix)
        .replace("__LOCATIONS__", &locations))
}

/// Keeps embedded JSON from closing the surrounding `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn embeds_center_and_locations() {
        let record = LocationRecord::from_value(json!({
            "external_id": 77,
            "name": "Pier",
            "lat": 40.7,
            "lng": -74.0
        }))
        .unwrap();

        let html = render_map(QueryPoint::new(40.7, -74.01), &[record], "?max_id=1").unwrap();
        assert!(html.contains("const center = [40.7, -74.01];"));
        assert!(html.contains("\"external_id\":77"));
        assert!(html.contains("const dateSuffix = \"?max_id=1\";"));
        assert!(!html.contains("__LOCATIONS__"));
    }

    #[test]
    fn escapes_script_terminators_in_names() {
        let record = LocationRecord::from_value(json!({
            "external_id": 1,
            "name": "</script><script>alert(1)</script>",
            "lat": 1.0,
            "lng": 1.0
        }))
        .unwrap();

        let html = render_map(QueryPoint::new(1.0, 1.0), &[record], "").unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
