//! Atomic file replacement for registries and generated batches.
//!
//! Contents land in a hidden sibling file first and are renamed over the
//! target only after a full write and sync, so readers see either the old
//! file or the new one.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A failed atomic write, naming the path that could not be written.
///
/// Callers translate this into their own error enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AtomicWriteError {
    pub(crate) path: Utf8PathBuf,
    pub(crate) message: String,
}

impl AtomicWriteError {
    fn new(path: &Utf8Path, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Replaces `path` inside `dir` with `contents`.
///
/// `path` must be a bare file name relative to `dir`.
pub(crate) fn write_atomic(
    dir: &Dir,
    path: &Utf8Path,
    contents: &str,
) -> Result<(), AtomicWriteError> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(AtomicWriteError::new(path, "target path must be a file name"));
    };
    let tmp_name = temp_name_for(file_name);
    let tmp_path = path.with_file_name(&tmp_name);

    write_temp_file(dir, &tmp_name, contents)
        .map_err(|err| discard_temp(dir, &tmp_name, &tmp_path, &err))?;
    rename_over(dir, &tmp_name, file_name)
        .map_err(|err| discard_temp(dir, &tmp_name, path, &err))?;
    sync_directory(dir);

    Ok(())
}

fn temp_name_for(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{file_name}.tmp.{}.{nanos}.{counter}", std::process::id())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

fn discard_temp(
    dir: &Dir,
    tmp_name: &str,
    reported: &Utf8Path,
    err: &io::Error,
) -> AtomicWriteError {
    // The temp file may not exist if creation itself failed.
    drop(dir.remove_file(tmp_name));
    AtomicWriteError::new(reported, err.to_string())
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows refuses to rename onto an existing file.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_directory(dir: &Dir) {
    // Best effort; not every platform can sync a directory handle.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}
