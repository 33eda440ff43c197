//! Conversion of WfCommons execution traces into HyperFlow workflow documents.

/// WfCommons trace document types
mod trace;
pub use trace::{FileLink, Job, Trace, TraceFile, TraceWorkflow};

/// trace -> workflow conversion
mod convert;
pub use convert::{convert_str, logical_name};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown file link \"{0}\" for file \"{1}\" in job \"{2}\"")]
    UnknownFileLink(String, String, String),
}
