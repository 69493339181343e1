//! Output writers for an expansion result.
//!
//! Every writer renders to an in-memory string first so the formats can be
//! tested without touching the filesystem.

mod geojson;
mod map;
mod table;

use std::path::{Path, PathBuf};

use anyhow::Context;
use geosweep_core::{ExternalId, LocationRecord, QueryPoint};

pub(crate) use geojson::feature_collection;
pub(crate) use map::render_map;
pub(crate) use table::render_csv;

const LOCATION_PAGE_BASE: &str = "https://www.instagram.com/explore/locations/";

/// Files requested on the command line.
#[derive(Debug, Default, Clone)]
pub(crate) struct OutputTargets {
    pub json: Option<PathBuf>,
    pub geojson: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub map: Option<PathBuf>,
    pub ids: Option<PathBuf>,
}

impl OutputTargets {
    pub(crate) fn is_empty(&self) -> bool {
        self.json.is_none()
            && self.geojson.is_none()
            && self.csv.is_none()
            && self.map.is_none()
            && self.ids.is_none()
    }
}

/// Public page for a location, optionally pinned to a date via `date_suffix`.
pub(crate) fn location_url(id: &ExternalId, date_suffix: &str) -> String {
    format!("{LOCATION_PAGE_BASE}{id}{date_suffix}")
}

/// Writes every requested output, stopping at the first I/O failure.
///
/// # Errors
///
/// Returns an error naming the file that could not be written.
pub(crate) fn write_outputs(
    targets: &OutputTargets,
    records: &[LocationRecord],
    center: QueryPoint,
    date_suffix: &str,
) -> anyhow::Result<()> {
    if let Some(path) = &targets.json {
        write_file(path, &serde_json::to_string(records)?)?;
    }
    if let Some(path) = &targets.geojson {
        write_file(path, &feature_collection(records).to_string())?;
    }
    if let Some(path) = &targets.map {
        write_file(path, &render_map(center, records, date_suffix)?)?;
    }
    if let Some(path) = &targets.csv {
        write_file(path, &render_csv(records, date_suffix))?;
    }
    if let Some(path) = &targets.ids {
        write_file(path, &render_ids(records))?;
    }
    Ok(())
}

/// Newline-separated external ids. Records without one are skipped.
pub(crate) fn render_ids(records: &[LocationRecord]) -> String {
    records
        .iter()
        .filter_map(|r| r.external_id().as_ref().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One console line per record: id, name and page URL.
pub(crate) fn summary_lines(records: &[LocationRecord], date_suffix: &str) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            let name = record.text("name").unwrap_or_else(|| "(unnamed)".to_owned());
            match record.external_id() {
                Some(id) => format!("{id:<20} {name}  {}", location_url(&id, date_suffix)),
                None => format!("{:<20} {name}", "-"),
            }
        })
        .collect()
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
