use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use util::{HashMap, Hasher};

use crate::{Process, ProcessId, Signal, SignalId, SignalRef};

/// A HyperFlow workflow document: the root of everything we analyze.
///
/// Only the parts needed for graph analysis are typed; everything else
/// (including `machines` and `traceInfo`) is carried through unchanged
/// so that the annotated document can be written back out.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(default)]
    pub name: String,
    #[serde(alias = "tasks", default)]
    pub processes: Vec<Process>,
    #[serde(alias = "data", default)]
    pub signals: Vec<Signal>,
    /// Workflow input signals.
    #[serde(default)]
    pub ins: Vec<SignalRef>,
    /// Workflow output signals.
    #[serde(default)]
    pub outs: Vec<SignalRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machines: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_info: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workflow {
    /// Parse a workflow document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let wf: Workflow = serde_json::from_str(text).context("while parsing workflow JSON")?;
        log::debug!(
            "Parsed workflow \"{}\" with {} processes and {} signals",
            wf.name,
            wf.processes.len(),
            wf.signals.len()
        );
        Ok(wf)
    }

    /// Serialize this workflow as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[inline]
    pub fn num_processes(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn num_signals(&self) -> usize {
        self.signals.len()
    }

    /// Get the process with the given id.
    #[inline]
    pub fn process(&self, id: ProcessId) -> &Process {
        &self.processes[usize::from(id)]
    }

    /// Get a mutable reference to the process with the given id.
    #[inline]
    pub fn process_mut(&mut self, id: ProcessId) -> &mut Process {
        &mut self.processes[usize::from(id)]
    }

    /// Get the signal with the given id.
    #[inline]
    pub fn signal(&self, id: SignalId) -> &Signal {
        &self.signals[usize::from(id)]
    }

    /// Get a mutable reference to the signal with the given id.
    #[inline]
    pub fn signal_mut(&mut self, id: SignalId) -> &mut Signal {
        &mut self.signals[usize::from(id)]
    }

    /// Iterate through all process ids in document order.
    pub fn process_ids(&self) -> impl Iterator<Item = ProcessId> {
        (0..self.processes.len()).map(ProcessId::from)
    }

    /// Map each signal name to its id. If a name is duplicated, the first one wins.
    pub fn signal_names(&self) -> HashMap<String, SignalId> {
        let mut names = HashMap::with_capacity_and_hasher(self.signals.len(), Hasher::default());
        for (idx, sig) in self.signals.iter().enumerate() {
            names.entry(sig.name.clone()).or_insert_with(|| idx.into());
        }
        names
    }
}
