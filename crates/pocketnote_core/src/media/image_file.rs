//! Capture target files in the app-private pictures directory.
//!
//! File names follow `JPEG_<yyyyMMdd_HHmmss>_<random>.jpg`.

use chrono::{DateTime, TimeZone};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

const CAPTURE_FILE_PREFIX: &str = "JPEG_";
const CAPTURE_FILE_SUFFIX: &str = ".jpg";
const CAPTURE_RANDOM_CHARS: usize = 10;

static CAPTURE_FILE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^JPEG_\d{8}_\d{6}_[A-Za-z0-9]+\.jpg$").expect("valid capture file regex")
});

/// Creates an empty capture target inside `dir` and keeps it on disk.
///
/// `dir` is created when missing. Returns the absolute path of the file.
///
/// # Errors
/// - Returns the underlying I/O error when the directory or file cannot be
///   created.
pub fn create_image_file<Tz>(dir: &Path, now: DateTime<Tz>) -> io::Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    std::fs::create_dir_all(dir)?;
    let prefix = format!(
        "{CAPTURE_FILE_PREFIX}{}_",
        now.format("%Y%m%d_%H%M%S")
    );
    let file = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(CAPTURE_FILE_SUFFIX)
        .rand_bytes(CAPTURE_RANDOM_CHARS)
        .tempfile_in(dir)?;
    let (_, path) = file.keep().map_err(|err| err.error)?;
    Ok(path)
}

/// Removes a capture target that will never be attached.
///
/// Returns `false` when the file could not be removed; the failure is logged
/// so orphaned targets can be traced.
pub fn remove_image_file(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(
                "event=capture_cleanup module=media status=ok file={}",
                display_name(path)
            );
            true
        }
        Err(err) => {
            warn!(
                "event=capture_cleanup module=media status=error file={} error={err}",
                display_name(path)
            );
            false
        }
    }
}

pub(crate) fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown")
}

/// Returns whether `name` matches the capture file naming pattern.
pub fn is_capture_file_name(name: &str) -> bool {
    CAPTURE_FILE_NAME_RE.is_match(name)
}
