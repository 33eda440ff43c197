use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::args::{ConvertArgs, InfoArgs};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0} file not found: \"{1}\"")]
    FileNotFound(&'static str, String),
    #[error("File directory is not a directory: \"{0}\"")]
    NotDirectory(String),
}

/// Settings are like Args, except all the logic has been applied,
/// so paths are checked and canonicalized.
#[derive(Debug)]
pub struct Settings {
    pub workflow: PathBuf,
    pub partmap: Option<PathBuf>,
    pub filedir: Option<PathBuf>,
    pub summary: bool,
    pub verbose: u8,
}

impl TryFrom<InfoArgs> for Settings {
    type Error = anyhow::Error;
    fn try_from(args: InfoArgs) -> Result<Self, Self::Error> {
        let workflow = existing_file("Workflow", &args.workflow)?;
        let partmap = args
            .partmap
            .as_deref()
            .map(|path| existing_file("Partition map", path))
            .transpose()?;

        let filedir = match args.filedir {
            Some(dir) => {
                let path = PathBuf::from(&dir);
                if !path.is_dir() {
                    return Err(Error::NotDirectory(dir).into());
                }
                Some(path.canonicalize()?)
            }
            None => None,
        };

        Ok(Self {
            workflow,
            partmap,
            filedir,
            summary: args.summary,
            verbose: args.verbose,
        })
    }
}

/// Settings for converting a WfCommons trace.
#[derive(Debug)]
pub struct ConvertSettings {
    pub trace: PathBuf,
    pub verbose: u8,
}

impl TryFrom<ConvertArgs> for ConvertSettings {
    type Error = anyhow::Error;
    fn try_from(args: ConvertArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            trace: existing_file("Trace", &args.trace)?,
            verbose: args.verbose,
        })
    }
}

fn existing_file(what: &'static str, path: &str) -> Result<PathBuf> {
    let p = Path::new(path);
    if p.exists() {
        Ok(p.canonicalize()?)
    } else {
        Err(Error::FileNotFound(what, path.to_owned()).into())
    }
}
