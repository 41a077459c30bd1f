use jiff::{Timestamp, Zoned, tz};

/// Localize a timestamp to the browser's timezone.
pub fn localize_timestamp(timestamp: Timestamp) -> Zoned {
    timestamp.to_zoned(tz::TimeZone::system())
}

/// Format a zoned timestamp for display in RFC 2822 format
pub fn format_zoned_timestamp(zoned: &Zoned) -> String {
    zoned.strftime("%a, %d %b %Y %H:%M:%S %Z").to_string()
}

/// Display form of a snapshot timestamp. Anything that isn't an RFC 3339
/// timestamp is shown as received.
pub fn format_snapshot_timestamp(raw: &str) -> String {
    match raw.parse::<Timestamp>() {
        Ok(timestamp) => {
            format_zoned_timestamp(&localize_timestamp(timestamp))
        }
        Err(_) => raw.to_string(),
    }
}
