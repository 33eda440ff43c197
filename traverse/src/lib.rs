//!
//! The functions in this mod analyze the structure of a `Workflow`'s dependency graph.
//!
//! The analysis happens in 3 steps:
//! 1. Build a [`DependencyGraph`] from the processes' input and output signals,
//!    ordering the processes so that each one follows all of its predecessors.
//! 2. Walk that order once, assigning each process a phase one greater than
//!    the deepest of its predecessors ([`assign_phases`]).
//! 3. Optionally record externally computed partitions on the processes
//!    ([`apply_partitions`]) and count processes per phase per partition
//!    ([`partitioning_per_phase`]).

/// process-level dependency graph, in topological order
mod graph;
pub use graph::DependencyGraph;

/// graph node for a single process
mod node;
pub use node::Node;

/// phase (level) assignment
mod phase;
pub use phase::{assign_phases, Levels};

/// partition assignment and phase × partition histogram
mod partition;
pub use partition::{apply_partitions, partitioning_per_phase, PartitionHistogram, PartitionMap};

mod errors;
pub use errors::Errors;

#[cfg(test)]
mod test_util;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Signal {0} referenced by process \"{1}\" ({2}) does not exist")]
    SignalNotFound(String, String, String),
    #[error("Cyclic workflow: {0} processes can't be ordered: {1}")]
    CyclicWorkflow(usize, String),
    #[error("Partition map has {1} entries but the workflow has {0} processes")]
    PartitionMapLength(usize, usize),
    #[error("No partition for process \"{0}\" ({1})")]
    MissingPartition(String, String),
    #[error("Invalid partition for process \"{0}\" ({1})")]
    InvalidPartition(String, String),
    #[error("Invalid partition map entry {1}: \"{0}\"")]
    InvalidPartitionEntry(String, usize),
    #[error("Process \"{0}\" ({1}) has no valid phase; assign phases first")]
    PhaseNotAssigned(String, String),
}
