use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Recursively visit every regular file under `dir`, calling `visit` with its path and size.
///
/// Symlinks to files are followed. Symlinks to directories are not descended into,
/// so a link pointing back up the tree can't make us loop.
pub fn walk_files<F>(dir: &Path, visit: &mut F) -> Result<()>
where
    F: FnMut(&Path, u64) -> Result<()>,
{
    let entries = fs::read_dir(dir).with_context(|| format!("reading dir {:?}", dir))?;
    for entry in entries {
        let entry = entry?;
        let ty = entry.file_type()?;
        let path = entry.path();
        if ty.is_symlink() {
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => visit(&path, meta.len())?,
                Ok(_) => log::debug!("not following directory symlink {:?}", path),
                Err(e) => log::debug!("skipping broken symlink {:?}: {e}", path),
            }
        } else if ty.is_dir() {
            walk_files(&path, visit)?;
        } else if ty.is_file() {
            let len = entry
                .metadata()
                .with_context(|| format!("reading metadata for {:?}", path))?
                .len();
            visit(&path, len)?;
        } else {
            log::debug!("skipping {:?}: not a file, dir, or symlink", path);
        }
    }
    Ok(())
}

/// Symlink the given `link` to `tgt`; works for unix and windows.
#[cfg(test)]
pub fn symlink(tgt: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(tgt, link)?;

    #[cfg(windows)]
    if tgt.is_dir() {
        std::os::windows::fs::symlink_dir(tgt, link)?;
    } else {
        std::os::windows::fs::symlink_file(tgt, link)?;
    }
    Ok(())
}
