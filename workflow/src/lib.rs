//! Types for the HyperFlow workflow JSON document.

mod id;
pub use id::{ProcessId, SignalId};

mod signal;
pub use signal::{Signal, SignalRef};

mod process;
pub use process::{Executor, Process, ProcessConfig, ProcessKind, ProcessTraceInfo};

mod workflow;
pub use workflow::Workflow;

/// Placeholder written into a process's `function` when the real one is unknown.
pub const FUNCTION_PLACEHOLDER: &str = "{{function}}";
