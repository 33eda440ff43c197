use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Utility fns
mod ops;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("\"{0}\" is not a directory")]
    NotDirectory(String),
}

/// All file operations in the crate should go through this struct.
///
/// Nothing here writes to disk: workflow documents are read,
/// directories of workflow files are only walked to learn file sizes,
/// and results go to stdout.
#[derive(Debug, Default)]
pub struct Fs;

impl Fs {
    pub fn new() -> Self {
        Self
    }

    /// Check if path exists and is a directory.
    pub fn is_dir<T: AsRef<Path>>(&self, path: T) -> Result<bool> {
        let path = path.as_ref();
        if path.is_dir() || (path.is_symlink() && path.canonicalize()?.is_dir()) {
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Read entire file into a String.
    pub fn read_to_buf<T: AsRef<Path>>(&self, path: T, strbuf: &mut String) -> Result<()> {
        use std::io::Read;
        let path = path.as_ref();
        strbuf.clear();
        let cap = fs::metadata(path)?.len() as usize;
        if cap > strbuf.len() {
            strbuf.reserve(cap - strbuf.len());
        }
        let mut f = fs::File::open(path)?;
        f.read_to_string(strbuf)?;
        Ok(())
    }

    /// Visit every file under `dir` (recursively) with its path and size in bytes.
    pub fn walk_files<T, F>(&self, dir: T, mut visit: F) -> Result<()>
    where
        T: AsRef<Path>,
        F: FnMut(&Path, u64) -> Result<()>,
    {
        let dir = dir.as_ref();
        if !self.is_dir(dir)? {
            return Err(Error::NotDirectory(format!("{}", dir.display())).into());
        }
        ops::walk_files(dir, &mut visit).with_context(|| format!("while walking {:?}", dir))
    }
}
