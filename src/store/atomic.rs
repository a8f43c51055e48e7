use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::Builder;

use crate::error::{PickerError, PickerResult};

/// Replaces `path` with `contents` through a synced sibling temp file and a rename.
///
/// A crash leaves either the previous file or the new one, never a truncated mix.
pub fn write_atomic(path: &Path, contents: &str) -> PickerResult<()> {
    let write_error = |source: std::io::Error| PickerError::StoreWrite {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_error)?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("store");
    let mut tmp = Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(write_error)?;
    tmp.write_all(contents.as_bytes()).map_err(write_error)?;
    tmp.flush().map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
