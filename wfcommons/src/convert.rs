use anyhow::{Context, Result};
use serde_json::{Map, Value};

use util::{HashMap, Hasher};
use workflow::{
    Executor, Process, ProcessConfig, ProcessTraceInfo, Signal, SignalId, SignalRef, Workflow,
    FUNCTION_PLACEHOLDER,
};

use crate::{Error, FileLink, Job, Trace, TraceFile};

/// WfCommons doesn't record executables.
const UNKNOWN_EXECUTABLE: &str = "unknown";
/// Suffix WfCommons appends to job names to make them unique.
const JOB_ID_MARKER: &str = "_ID";

/// Parse a WfCommons trace and convert it to a HyperFlow workflow.
pub fn convert_str(text: &str) -> Result<Workflow> {
    let trace: Trace = serde_json::from_str(text).context("while parsing WfCommons trace")?;
    Workflow::try_from(trace)
}

/// Strip a trailing `_ID<digits>` from a job name to get the logical process name,
/// e.g. `"simulate_ID00042"` becomes `"simulate"`.
pub fn logical_name(job_name: &str) -> &str {
    match job_name.rfind(JOB_ID_MARKER) {
        Some(idx) => {
            let digits = &job_name[idx + JOB_ID_MARKER.len()..];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                &job_name[..idx]
            } else {
                job_name
            }
        }
        None => job_name,
    }
}

struct SignalEntry {
    signal: Signal,
    has_sources: bool,
    has_sinks: bool,
}

/// Deduplicated table of every file mentioned in the trace.
/// The first mention of a file decides its name and size.
struct SignalTable {
    entries: Vec<SignalEntry>,
    index: HashMap<String, SignalId>,
}

impl SignalTable {
    fn with_capacity(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap),
            index: HashMap::with_capacity_and_hasher(cap, Hasher::default()),
        }
    }

    /// Get the id of `file`'s signal, adding it if we haven't seen it yet,
    /// and note whether it is produced or consumed here.
    fn add(&mut self, file: &TraceFile, link: FileLink) -> SignalId {
        let id = match self.index.get(&file.name) {
            Some(id) => *id,
            None => {
                let id = SignalId::from(self.entries.len());
                self.entries.push(SignalEntry {
                    signal: Signal::new(file.name.clone(), file.size),
                    has_sources: false,
                    has_sinks: false,
                });
                self.index.insert(file.name.clone(), id);
                id
            }
        };
        let entry = &mut self.entries[usize::from(id)];
        match link {
            FileLink::Input => entry.has_sinks = true,
            FileLink::Output => entry.has_sources = true,
        }
        id
    }

    /// Split into the signal list plus workflow inputs (never produced)
    /// and workflow outputs (never consumed).
    fn finish(self) -> (Vec<Signal>, Vec<SignalRef>, Vec<SignalRef>) {
        let mut signals = Vec::with_capacity(self.entries.len());
        let mut ins = Vec::new();
        let mut outs = Vec::new();
        for (idx, mut entry) in self.entries.into_iter().enumerate() {
            if !entry.has_sources {
                ins.push(SignalRef::Index(idx));
                entry.signal.data = Some(vec![Value::Object(Map::new())]);
            }
            if !entry.has_sinks {
                outs.push(SignalRef::Index(idx));
            }
            signals.push(entry.signal);
        }
        (signals, ins, outs)
    }
}

impl TryFrom<Trace> for Workflow {
    type Error = anyhow::Error;

    fn try_from(trace: Trace) -> Result<Self, Self::Error> {
        let Trace { name, workflow } = trace;
        let mut table = SignalTable::with_capacity(workflow.jobs.len() * 2);
        let mut processes = Vec::with_capacity(workflow.jobs.len());

        for job in workflow.jobs {
            processes.push(job_to_process(job, &mut table)?);
        }

        let (signals, ins, outs) = table.finish();
        log::info!(
            "Converted trace \"{}\": {} processes, {} signals, {} inputs, {} outputs",
            name,
            processes.len(),
            signals.len(),
            ins.len(),
            outs.len(),
        );

        let mut trace_info = Map::new();
        if let Some(makespan) = workflow.makespan {
            trace_info.insert("makespan".to_owned(), makespan);
        }

        Ok(Workflow {
            name,
            processes,
            signals,
            ins,
            outs,
            machines: workflow.machines,
            trace_info: Some(Value::Object(trace_info)),
            extra: Map::new(),
        })
    }
}

fn job_to_process(job: Job, table: &mut SignalTable) -> Result<Process> {
    let mut process = Process::new(logical_name(&job.name));
    process.function = Some(FUNCTION_PLACEHOLDER.to_owned());
    process.firing_limit = Some(1);

    for file in &job.files {
        let link = file.link().ok_or_else(|| {
            Error::UnknownFileLink(file.link.clone(), file.name.clone(), job.name.clone())
        })?;
        let sig = SignalRef::from(table.add(file, link));
        match link {
            FileLink::Input => process.ins.push(sig),
            FileLink::Output => process.outs.push(sig),
        }
    }

    process.config = ProcessConfig {
        executor: Some(Executor {
            executable: Some(UNKNOWN_EXECUTABLE.to_owned()),
            args: job.arguments,
            cpu_request: job.cores,
            ..Default::default()
        }),
        trace_info: Some(ProcessTraceInfo {
            avg_cpu: job.avg_cpu,
            bytes_read: job.bytes_read,
            bytes_written: job.bytes_written,
            memory: job.memory,
            machine: job.machine,
            ..Default::default()
        }),
        ..Default::default()
    };

    Ok(process)
}
