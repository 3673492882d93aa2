use eyre::Context;
use flate2::read::MultiGzDecoder;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::{
    fs::{self, Permissions},
    io::{self, Read, Write},
    path::Path,
    time::Instant,
};
use tempfile::Builder;

/// Decompresses a whole gzip stream, including concatenated members.
pub fn decompress(compressed: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(compressed);
    let mut content = Vec::new();
    decoder.read_to_end(&mut content)?;
    Ok(content)
}

/// Decompresses `compressed` and atomically replaces `target` with the result.
///
/// The archive is decoded before anything touches the filesystem, so a corrupt
/// download leaves the previous local copy in place. A replaced file keeps its
/// permissions; a new one gets the same mode as any file created under the
/// current umask.
pub fn write_decompressed(compressed: &[u8], target: &Path) -> eyre::Result<()> {
    tracing::trace!(target: "compression", path = %target.display(), "Decompressing archive");
    let start = Instant::now();
    let content = decompress(compressed)
        .wrap_err_with(|| format!("failed to decompress archive for {}", target.display()))?;

    let directory =
        target.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let mut builder = Builder::new();
    // 0666 is masked by the umask when the file is opened
    #[cfg(unix)]
    builder.permissions(Permissions::from_mode(0o666));
    let mut output = builder.tempfile_in(directory)?;
    output.write_all(&content)?;
    if let Some(permissions) = existing_permissions(target)? {
        output.as_file().set_permissions(permissions)?;
    }
    output.persist(target).wrap_err_with(|| format!("failed to write {}", target.display()))?;

    let source_len = compressed.len();
    let target_len = content.len();
    tracing::trace!(target: "compression", elapsed = ?start.elapsed(), source_len, target_len, "Finished decompressing");
    Ok(())
}

fn existing_permissions(target: &Path) -> io::Result<Option<Permissions>> {
    match fs::metadata(target) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{gzip, MONTH};

    #[test]
    fn writes_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("2020-March.txt");
        write_decompressed(&gzip(MONTH), &target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), MONTH);
    }

    #[test]
    fn preserves_non_utf8_bytes() {
        let content = b"Subject: caf\xe9\r\n\x00\xff".to_vec();
        assert_eq!(decompress(&gzip(&content)).unwrap(), content);
    }

    #[test]
    fn decodes_concatenated_members() {
        let mut compressed = gzip(b"first half, ");
        compressed.extend(gzip(b"second half"));
        assert_eq!(decompress(&compressed).unwrap(), b"first half, second half");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("2020-March.txt");
        fs::write(&target, "a much longer stale local copy of the month").unwrap();
        write_decompressed(&gzip(b"fresh"), &target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"fresh");
    }

    #[test]
    fn corrupt_archive_keeps_previous_copy() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("2020-March.txt");
        fs::write(&target, MONTH).unwrap();
        assert!(write_decompressed(b"definitely not gzip", &target).is_err());
        assert_eq!(fs::read(&target).unwrap(), MONTH);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn new_file_follows_umask() {
        let dir = tempfile::tempdir().unwrap();
        let sibling = dir.path().join("sibling.txt");
        fs::write(&sibling, b"").unwrap();

        let target = dir.path().join("2020-March.txt");
        write_decompressed(&gzip(MONTH), &target).unwrap();
        assert_eq!(mode(&target), mode(&sibling));
    }

    #[cfg(unix)]
    #[test]
    fn replaced_file_keeps_its_mode() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("2020-March.txt");
        fs::write(&target, b"stale").unwrap();
        fs::set_permissions(&target, Permissions::from_mode(0o640)).unwrap();

        write_decompressed(&gzip(MONTH), &target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), MONTH);
        assert_eq!(mode(&target), 0o640);
    }
}
