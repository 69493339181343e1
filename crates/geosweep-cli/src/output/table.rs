//! CSV export, one row per record.

use geosweep_core::LocationRecord;

use super::location_url;

/// Column order of the export. The unnamed first column is the row index;
/// the last is derived from the external id.
const COLUMNS: [&str; 9] = [
    "",
    "name",
    "external_id",
    "external_id_source",
    "lat",
    "lng",
    "address",
    "minimum_age",
    "url",
];

/// Renders `records` as RFC 4180 CSV with a header row.
///
/// Field values are written as received: strings verbatim, other JSON values
/// in their JSON form, absent fields and nulls as empty cells.
pub(crate) fn render_csv(records: &[LocationRecord], date_suffix: &str) -> String {
    let mut out = String::new();
    push_row(&mut out, COLUMNS.iter().map(|c| (*c).to_owned()));

    for (index, record) in records.iter().enumerate() {
        let url = record
            .external_id()
            .map(|id| location_url(&id, date_suffix))
            .unwrap_or_default();
        let fields = COLUMNS[1..COLUMNS.len() - 1]
            .iter()
            .map(|column| record.text(column).unwrap_or_default());
        push_row(
            &mut out,
            std::iter::once(index.to_string())
                .chain(fields)
                .chain(std::iter::once(url)),
        );
    }
    out
}

fn push_row(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let row: Vec<String> = fields.into_iter().map(|f| escape(&f)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
