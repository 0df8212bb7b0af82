use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::AppResult;

/// Display format for commit dates, e.g. `Mon, 25 Aug 2025 12:00:00 GMT`.
const UTC_DISPLAY_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[weekday repr:short], [day padding:zero] [month repr:short] [year] [hour padding:zero]:[minute padding:zero]:[second padding:zero] GMT"
);

/// Format a timestamp for display, normalized to UTC.
pub fn format_utc(dt: OffsetDateTime) -> AppResult<String> {
    Ok(dt.to_offset(UtcOffset::UTC).format(UTC_DISPLAY_FORMAT)?)
}

/// Convert a git commit time (seconds since the Unix epoch) to a timestamp.
/// Returns `None` for timestamps outside the representable range.
pub fn commit_time_to_datetime(time: git2::Time) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(time.seconds()).ok()
}
