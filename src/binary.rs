//! Text/binary classification of collected files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

/// Number of leading bytes inspected for a NUL byte.
pub const SNIFF_LEN: u64 = 1024;

/// Lowercase extensions (without the dot) that are always treated as binary.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "ico", "webp", // images
    "mp3", "wav", "ogg", "flac", // audio
    "mp4", "avi", "mov", "wmv", // video
    "zip", "tar", "gz", "bz2", "7z", "rar", // archives
    "exe", "dll", "so", "dylib", // executables
    "pyc", "pyd", "pyo", // compiled
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", // documents
];

pub fn has_binary_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.as_str()))
}

/// Heuristic text/binary split: known binary extension, else a NUL byte in the
/// first [`SNIFF_LEN`] bytes. A file that cannot be read counts as binary.
pub fn is_binary_file(path: &Path) -> bool {
    if has_binary_extension(path) {
        return true;
    }

    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    let read = File::open(path).and_then(|f| f.take(SNIFF_LEN).read_to_end(&mut head));
    match read {
        Ok(_) => head.contains(&0),
        Err(e) => {
            debug!(path = %path.display(), error = ?e, "Unreadable file treated as binary");
            true
        }
    }
}
