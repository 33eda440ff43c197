use workflow::{ProcessId, SignalId};

/// A process as seen by the dependency graph:
/// its resolved signals and its neighbours.
#[derive(Debug, Default, Clone)]
pub struct Node {
    /// signals consumed by this process, in document order.
    pub ins: Vec<SignalId>,
    /// signals produced by this process, in document order.
    pub outs: Vec<SignalId>,
    /// processes producing at least one of our inputs; sorted, no duplicates.
    pub predecessors: Vec<ProcessId>,
    /// processes consuming at least one of our outputs; sorted, no duplicates.
    pub successors: Vec<ProcessId>,
}

impl Node {
    /// true if this process has no antecedents.
    pub fn is_root(&self) -> bool {
        self.predecessors.is_empty()
    }
}
