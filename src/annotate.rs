use std::path::Path;

use anyhow::Result;

use workflow::Workflow;

use crate::fs::Fs;

/// Overwrite signal sizes with the on-disk sizes of matching files under `dir`.
///
/// A file matches a signal when its base name equals the signal's name.
/// Files that match no signal are ignored. If the walk fails partway through,
/// sizes already written stay written.
///
/// Returns the number of matching files.
pub fn annotate_sizes(wf: &mut Workflow, fs: &Fs, dir: &Path) -> Result<usize> {
    let names = wf.signal_names();
    let mut matched = 0;

    fs.walk_files(dir, |path, len| {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(());
        };
        if let Some(id) = names.get(file_name) {
            log::debug!("{} is {len} bytes ({:?})", file_name, path);
            wf.signal_mut(*id).size = Some(len);
            matched += 1;
        } else {
            log::trace!("no signal for {:?}", path);
        }
        Ok(())
    })?;

    log::info!("Annotated sizes of {matched} files from {:?}", dir);
    Ok(matched)
}
