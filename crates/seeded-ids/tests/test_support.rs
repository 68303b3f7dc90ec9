//! Shared capability-based filesystem helpers for seeded-ids tests.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Create a unique temp file path under `target/seeded-ids-tests`.
///
/// # Errors
///
/// Returns any filesystem errors encountered while creating the temp directory.
pub fn unique_temp_path(prefix: &str, file_name: &str) -> io::Result<Utf8PathBuf> {
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let process_id = std::process::id();
    let dir = Utf8PathBuf::from("target")
        .join("seeded-ids-tests")
        .join(format!("{prefix}-{process_id}-{counter}"));
    let root = Dir::open_ambient_dir(".", ambient_authority())?;
    root.create_dir_all(&dir)?;
    Ok(dir.join(file_name))
}

/// Open the parent directory of `path` with a capability-based handle.
///
/// # Errors
///
/// Returns any filesystem errors encountered while opening the directory.
pub fn open_parent_dir(path: &Utf8Path) -> io::Result<Dir> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    Dir::open_ambient_dir(parent, ambient_authority())
}

/// Write `contents` to a fresh file named `file_name` and return its path.
///
/// # Errors
///
/// Returns any filesystem errors encountered while writing the file.
pub fn write_temp_file(prefix: &str, file_name: &str, contents: &str) -> io::Result<Utf8PathBuf> {
    let path = unique_temp_path(prefix, file_name)?;
    open_parent_dir(&path)?.write(file_name, contents)?;
    Ok(path)
}

/// Remove the directory holding `path`, ignoring failures.
pub fn cleanup_parent(path: &Utf8Path) {
    if let (Some(parent), Ok(root)) = (
        path.parent(),
        Dir::open_ambient_dir(".", ambient_authority()),
    ) {
        drop(root.remove_dir_all(parent));
    }
}
