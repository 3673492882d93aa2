use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

pub const GZIP_SUFFIX: &str = ".txt.gz";
pub const TEXT_SUFFIX: &str = ".txt";

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A double-quoted archive name, as it appears in an `href` attribute.
static ARCHIVE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([0-9A-Za-z-]+\.txt\.gz)""#).expect("archive name pattern is valid")
});

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArchiveNameError {
    #[error("archive name {name:?} does not look like <year>-<month>.txt")]
    UnexpectedShape { name: String },
    #[error("unknown month {month:?} in archive name {name:?}")]
    UnknownMonth { name: String, month: String },
}

/// A single month listed on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Name of the compressed file on the server, e.g. `2020-March.txt.gz`.
    pub gzip_name: String,
    /// Name of the decompressed file in the local directory.
    pub txt_name: String,
}

impl ArchiveEntry {
    pub fn new(gzip_name: impl Into<String>, numeric: bool) -> Result<Self, ArchiveNameError> {
        let gzip_name = gzip_name.into();
        let txt_name = gzip_name.replace(GZIP_SUFFIX, TEXT_SUFFIX);
        let txt_name = if numeric { numeric_month_name(&txt_name)? } else { txt_name };
        Ok(Self { gzip_name, txt_name })
    }
}

/// Returns archive file names in the order they appear in the index page.
///
/// Only quoted names count, so link text, absolute URLs and prose mentions are
/// ignored. A name listed more than once is only returned at its first position.
pub fn extract_archive_names(index: &str) -> Vec<String> {
    ARCHIVE_NAME.captures_iter(index).map(|captures| captures[1].to_owned()).unique().collect()
}

/// Rewrites `2018-January.txt` into `2018-01.txt`.
pub fn numeric_month_name(txt_name: &str) -> Result<String, ArchiveNameError> {
    let (year, month, ext) = txt_name
        .split(['.', '-'])
        .collect_tuple()
        .ok_or_else(|| ArchiveNameError::UnexpectedShape { name: txt_name.to_owned() })?;
    let number = MONTHS.iter().position(|m| *m == month).ok_or_else(|| {
        ArchiveNameError::UnknownMonth { name: txt_name.to_owned(), month: month.to_owned() }
    })? + 1;
    Ok(format!("{year}-{number:02}.{ext}"))
}
