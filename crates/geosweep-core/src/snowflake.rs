//! Date to snowflake `max_id` encoding.
//!
//! Location pages accept a `max_id` cursor. Ids are snowflakes whose high bits
//! hold milliseconds since the service epoch, so the end of a calendar day maps
//! to the largest id that could have been issued on it.

use chrono::NaiveDate;

use crate::CoreError;

/// Service epoch in Unix milliseconds (2011-08-24 21:07:01.300 UTC).
pub const EPOCH_MS: i64 = 1_314_220_021_300;
const TIMESTAMP_SHIFT: u32 = 23;

/// Encodes a `YYYY-MM-DD` date as the snowflake id of 23:59:59 UTC that day.
///
/// # Errors
///
/// - [`CoreError::InvalidDate`] if `input` is not a valid `YYYY-MM-DD` date.
/// - [`CoreError::DateOutOfRange`] if the date precedes the service epoch or
///   overflows the id space.
pub fn encode_date(input: &str) -> Result<u64, CoreError> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        CoreError::InvalidDate {
            input: input.to_owned(),
            reason: e.to_string(),
        }
    })?;

    let end_of_day = date
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| CoreError::DateOutOfRange(input.to_owned()))?
        .and_utc();

    let since_epoch = end_of_day.timestamp_millis() - EPOCH_MS;
    u64::try_from(since_epoch)
        .ok()
        .and_then(|ms| ms.checked_mul(1u64 << TIMESTAMP_SHIFT))
        .ok_or_else(|| CoreError::DateOutOfRange(input.to_owned()))
}

/// Query-string suffix appended to location URLs: `?max_id=<id>` for a date,
/// empty when no date is given.
///
/// # Errors
///
/// Propagates any error from [`encode_date`].
pub fn max_id_suffix(date: Option<&str>) -> Result<String, CoreError> {
    match date {
        Some(date) => Ok(format!("?max_id={}", encode_date(date)?)),
        None => Ok(String::new()),
    }
}
