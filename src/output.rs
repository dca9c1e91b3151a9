//! Output path templating for single- and multi-prompt batches.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Computes the output path for prompt `index` (1-based) of `total`.
///
/// A single-prompt batch uses the base path verbatim. Larger batches insert
/// `_<index>` between the file stem and the extension, so sibling prompts
/// never write to the same file.
pub fn resolve_output_path(base: &Path, index: usize, total: usize) -> PathBuf {
    if total == 1 {
        return base.to_path_buf();
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match base.extension() {
        Some(ext) => format!("{stem}_{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{index}"),
    };

    match base.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Creates the missing parent directories of `path`, if any.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
