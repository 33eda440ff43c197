use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::SignalRef;

/// HyperFlow process type, from the process's `type` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ProcessKind {
    Dataflow,
    Foreach,
    Splitter,
    Choice,
    Join,
    /// Excluded from partitioning.
    Special,
    Other(String),
}

impl From<String> for ProcessKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "dataflow" => ProcessKind::Dataflow,
            "foreach" => ProcessKind::Foreach,
            "splitter" => ProcessKind::Splitter,
            "choice" => ProcessKind::Choice,
            "join" => ProcessKind::Join,
            "special" => ProcessKind::Special,
            _ => ProcessKind::Other(s),
        }
    }
}

impl From<ProcessKind> for String {
    fn from(kind: ProcessKind) -> Self {
        match kind {
            ProcessKind::Dataflow => "dataflow".to_owned(),
            ProcessKind::Foreach => "foreach".to_owned(),
            ProcessKind::Splitter => "splitter".to_owned(),
            ProcessKind::Choice => "choice".to_owned(),
            ProcessKind::Join => "join".to_owned(),
            ProcessKind::Special => "special".to_owned(),
            ProcessKind::Other(s) => s,
        }
    }
}

/// How a process is launched. Opaque to the analysis, except for `partition`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Executor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_request: Option<Number>,
    /// 1-based partition id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resource usage recorded for a process in an execution trace.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTraceInfo {
    #[serde(rename = "avgCPU", default, skip_serializing_if = "Option::is_none")]
    pub avg_cpu: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_read: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<Executor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_info: Option<ProcessTraceInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A computational task in the workflow.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProcessKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firing_limit: Option<u32>,
    #[serde(default)]
    pub config: ProcessConfig,
    #[serde(default)]
    pub ins: Vec<SignalRef>,
    #[serde(default)]
    pub outs: Vec<SignalRef>,
    /// 1-based depth in the dependency graph; set by phase assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Process {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// true if this process must not be assigned to a partition.
    pub fn is_special(&self) -> bool {
        matches!(self.kind, Some(ProcessKind::Special))
    }

    /// The partition recorded in this process's executor config, if any.
    pub fn partition(&self) -> Option<u32> {
        self.config.executor.as_ref().and_then(|e| e.partition)
    }

    /// Record a partition id, creating the executor config if necessary.
    pub fn set_partition(&mut self, partition: u32) {
        self.config
            .executor
            .get_or_insert_with(Executor::default)
            .partition = Some(partition);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_kind_round_trip() -> anyhow::Result<()> {
        let p: Process = serde_json::from_str(r#"{"name":"stage","type":"special"}"#)?;
        assert!(p.is_special());
        let p: Process = serde_json::from_str(r#"{"name":"stage","type":"csplitter"}"#)?;
        assert_eq!(Some(ProcessKind::Other("csplitter".to_owned())), p.kind);
        assert_eq!("csplitter", serde_json::to_value(&p)?["type"]);
        Ok(())
    }

    #[test]
    fn test_set_partition_creates_executor() {
        let mut p = Process::new("stage");
        assert_eq!(None, p.partition());
        p.set_partition(3);
        assert_eq!(Some(3), p.partition());
    }

    #[test]
    fn test_config_keeps_trace_fields() -> anyhow::Result<()> {
        let text = r#"{
            "name": "mProject",
            "config": {
                "executor": {
                    "executable": "mProject", "args": ["-X"], "cpuRequest": 1, "partition": 2
                },
                "traceInfo": {"avgCPU": 97.5, "bytesRead": 1024, "machine": "node-1"},
                "retries": 3
            },
            "ins": [0],
            "outs": [1]
        }"#;
        let p: Process = serde_json::from_str(text)?;
        assert_eq!(Some(2), p.partition());
        let info = p.config.trace_info.as_ref().map(|t| t.machine.clone());
        assert_eq!(Some(Some("node-1".to_owned())), info);

        let out = serde_json::to_value(&p)?;
        assert_eq!(97.5, out["config"]["traceInfo"]["avgCPU"]);
        assert_eq!(1024, out["config"]["traceInfo"]["bytesRead"]);
        assert_eq!(3, out["config"]["retries"]);
        Ok(())
    }
}
