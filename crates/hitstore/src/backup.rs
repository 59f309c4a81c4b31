//! Backup-on-write for the store file.
//!
//! Before a save overwrites the store file, the previous contents are copied
//! to `<path>.bak`. The whole original is read before the copy is written, and
//! the copy is flushed and synced before the caller may proceed.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StoreError};

/// Suffix appended to the store path to name its backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Returns `<path>.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copies the file at `path` to `<path>.bak`, replacing any older backup.
///
/// Returns the backup path. Any failure, including a missing source, is
/// reported as [`StoreError::Backup`]; callers must not overwrite `path`
/// in that case.
pub fn create_file_backup(path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    let fail = |source: std::io::Error| StoreError::Backup {
        path: path.to_path_buf(),
        source,
    };

    let mut contents = Vec::new();
    BufReader::new(File::open(path).map_err(fail)?)
        .read_to_end(&mut contents)
        .map_err(fail)?;

    let mut writer = BufWriter::new(File::create(&backup).map_err(fail)?);
    writer.write_all(&contents).map_err(fail)?;
    writer.flush().map_err(fail)?;
    writer.get_ref().sync_all().map_err(fail)?;

    debug!(
        path = %path.display(),
        backup = %backup.display(),
        bytes = contents.len(),
        "backed up store file"
    );
    Ok(backup)
}
