use serde::Deserialize;
use serde_json::{Number, Value};

/// Root of a WfCommons trace document.
#[derive(Deserialize, Debug, Clone)]
pub struct Trace {
    #[serde(default)]
    pub name: String,
    pub workflow: TraceWorkflow,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TraceWorkflow {
    /// Newer versions of the schema call these "tasks".
    #[serde(alias = "tasks")]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub machines: Option<Value>,
    #[serde(default)]
    pub makespan: Option<Value>,
}

/// One executed job and the files it read and wrote.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub name: String,
    #[serde(default)]
    pub files: Vec<TraceFile>,
    #[serde(default)]
    pub arguments: Option<Value>,
    #[serde(default)]
    pub cores: Option<Number>,
    #[serde(rename = "avgCPU", default)]
    pub avg_cpu: Option<Number>,
    #[serde(default)]
    pub bytes_read: Option<Number>,
    #[serde(default)]
    pub bytes_written: Option<Number>,
    #[serde(default)]
    pub memory: Option<Number>,
    #[serde(default)]
    pub machine: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TraceFile {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    /// "input" or "output"; anything else is rejected during conversion.
    pub link: String,
}

/// Role of a file in a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLink {
    Input,
    Output,
}

impl TraceFile {
    /// Interpret this file's `link`, or `None` if it isn't a known role.
    pub fn link(&self) -> Option<FileLink> {
        match self.link.as_str() {
            "input" => Some(FileLink::Input),
            "output" => Some(FileLink::Output),
            _ => None,
        }
    }
}
