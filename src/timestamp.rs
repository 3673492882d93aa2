use chrono::{DateTime, NaiveDateTime, Utc};
use std::{io, path::Path};

/// Obsolete HTTP date formats still sent by some servers (RFC 850 and asctime).
const LEGACY_HTTP_FORMATS: [&str; 2] = ["%A, %d-%b-%y %H:%M:%S GMT", "%a %b %e %H:%M:%S %Y"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognized date {value:?}")]
pub struct TimestampError {
    pub value: String,
}

/// Parses a `Last-Modified` header value and normalizes it to UTC.
pub fn parse_last_modified(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Ok(date.with_timezone(&Utc))
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc))
    }
    LEGACY_HTTP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError { value: value.to_owned() })
}

/// Modification time of a local file, or [`DateTime::<Utc>::MIN_UTC`] when it does not exist.
pub fn local_mtime(path: &Path) -> io::Result<DateTime<Utc>> {
    match path.metadata() {
        Ok(metadata) => Ok(metadata.modified()?.into()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(DateTime::<Utc>::MIN_UTC),
        Err(err) => Err(err),
    }
}
