use util::IdVec;
use workflow::{ProcessId, Workflow};

use crate::DependencyGraph;

/// Summary of the phase (level) structure of a workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Levels {
    /// Highest phase of any process; 0 for an empty workflow.
    pub n_levels: u32,
    /// `level_counts[k]` is the number of processes in phase `k + 1`.
    pub level_counts: Vec<usize>,
}

/// Compute each process's phase and record it on the process.
///
/// A process with no predecessors is in phase 1; any other process is
/// one phase after its deepest predecessor, i.e. the phase is the length
/// of the longest dependency chain ending at that process.
///
/// `graph` must have been built from `wf`.
pub fn assign_phases(wf: &mut Workflow, graph: &DependencyGraph) -> Levels {
    debug_assert_eq!(wf.num_processes(), graph.len());

    let mut phases = IdVec::<ProcessId, u32>::fill(1, graph.len());

    // graph.nodes() is topological, so every predecessor is final by the time we get here:
    for id in graph.nodes() {
        let deepest = graph
            .predecessors(*id)
            .iter()
            .map(|pred| *phases.get(*pred))
            .max()
            .unwrap_or(0);
        *phases.get_mut(*id) = deepest + 1;
    }

    let n_levels = phases.iter().copied().max().unwrap_or(0);
    let mut level_counts = vec![0; n_levels as usize];

    for (id, phase) in phases.iter_enumerated() {
        level_counts[*phase as usize - 1] += 1;
        wf.process_mut(id).phase = Some(*phase);
    }

    log::info!(
        "Workflow \"{}\" has {} levels: {:?}",
        wf.name,
        n_levels,
        level_counts
    );

    Levels {
        n_levels,
        level_counts,
    }
}
