use crate::{
    archive::{extract_archive_names, ArchiveEntry},
    compression::write_decompressed,
    remote::ArchiveRemote,
    timestamp::local_mtime,
};
use eyre::Context;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Store `2020-March.txt` as `2020-03.txt`.
    pub numeric: bool,
    /// End the run at the first archive that is already up to date.
    ///
    /// Only correct when the index lists months in chronological order, which
    /// pipermail always does.
    pub stop_at_first_unmodified: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self { numeric: false, stop_at_first_unmodified: true }
    }
}

/// What a single run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Archive names found on the index page.
    pub found: usize,
    /// Archives whose remote modification time was checked.
    pub inspected: usize,
    pub downloaded: usize,
    pub skipped: usize,
    /// The run ended at an up to date archive before the end of the index.
    pub stopped_early: bool,
}

/// Mirrors every archive listed by `remote` into `local_directory`.
///
/// An archive is downloaded when the server's modification time is strictly
/// newer than the local file's, a missing local file counting as infinitely old.
pub async fn run_sync<R: ArchiveRemote + ?Sized>(
    remote: &R,
    local_directory: &Path,
    options: SyncOptions,
) -> eyre::Result<SyncReport> {
    let index = remote.index().await?;
    let names = extract_archive_names(&index);
    tracing::debug!(target: "sync::archive", count = names.len(), "Found archives in index");

    let mut report = SyncReport { found: names.len(), ..Default::default() };
    for name in names {
        let entry = ArchiveEntry::new(name, options.numeric)?;
        let target = local_directory.join(&entry.txt_name);
        report.inspected += 1;

        let remote_mtime = remote.last_modified(&entry.gzip_name).await?;
        let local_mtime = local_mtime(&target)
            .wrap_err_with(|| format!("failed to read metadata of {}", target.display()))?;
        let modified = remote_mtime > local_mtime;
        tracing::debug!(
            target: "sync::archive",
            name = %entry.gzip_name,
            %remote_mtime,
            %local_mtime,
            "{}", if modified { "Downloading" } else { "Skipping" }
        );

        if modified {
            let compressed = remote.retrieve(&entry.gzip_name).await?;
            write_decompressed(&compressed, &target)?;
            tracing::info!(target: "sync::archive", name = %entry.txt_name, "Updated archive");
            report.downloaded += 1;
        } else {
            report.skipped += 1;
            if options.stop_at_first_unmodified {
                report.stopped_early = report.inspected < report.found;
                break
            }
        }
    }

    Ok(report)
}
