use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

/// Formats an instant the way JSON dates are written: RFC 3339 in UTC.
pub fn json_date(at: OffsetDateTime) -> String {
    let utc = at.to_offset(UtcOffset::UTC);
    utc.format(&Rfc3339).unwrap_or_else(|_| utc.to_string())
}
