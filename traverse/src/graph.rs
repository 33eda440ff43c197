use anyhow::Result;
use colored::Colorize;
use std::collections::VecDeque;

use util::{HashMap, IdVec};
use workflow::{ProcessId, SignalId, SignalRef, Workflow};

use crate::{Error, Errors, Node};

// how many unordered processes to name in a cyclic workflow error:
const MAX_CYCLE_NAMES: usize = 8;

/// Process-level dependency graph of a workflow.
///
/// There is an edge from process P to process Q whenever some signal
/// appears in P's outputs and in Q's inputs. Signals without a producer
/// are workflow inputs and contribute no edges.
#[derive(Debug)]
pub struct DependencyGraph {
    nodes: IdVec<ProcessId, Node>,
    /// every process, each one after all of its predecessors.
    order: Vec<ProcessId>,
    producers: IdVec<SignalId, Vec<ProcessId>>,
    consumers: IdVec<SignalId, Vec<ProcessId>>,
}

impl DependencyGraph {
    /// Build the graph for `wf`.
    ///
    /// Fails if any process references a signal that doesn't exist,
    /// or if the dependencies contain a cycle.
    pub fn build(wf: &Workflow) -> Result<Self> {
        let mut nodes = resolve_nodes(wf)?;

        let num_signals = wf.num_signals();
        let mut producers: IdVec<SignalId, Vec<ProcessId>> = IdVec::fill(Vec::new(), num_signals);
        let mut consumers: IdVec<SignalId, Vec<ProcessId>> = IdVec::fill(Vec::new(), num_signals);

        for (id, node) in nodes.iter_enumerated() {
            for sig in &node.outs {
                producers.get_mut(*sig).push(id);
            }
            for sig in &node.ins {
                consumers.get_mut(*sig).push(id);
            }
        }

        for node in nodes.iter_mut() {
            node.predecessors = collect_neighbours(&node.ins, &producers);
            node.successors = collect_neighbours(&node.outs, &consumers);
        }

        let order = topological_order(&nodes);
        if order.len() < nodes.len() {
            return Err(cycle_error(wf, &nodes, &order).into());
        }

        log::debug!(
            "Built dependency graph with {} processes and {} edges",
            nodes.len(),
            nodes.iter().map(|n| n.predecessors.len()).sum::<usize>(),
        );

        Ok(Self {
            nodes,
            order,
            producers,
            consumers,
        })
    }

    /// All processes, in topological order: each process comes after all of its predecessors.
    pub fn nodes(&self) -> &[ProcessId] {
        &self.order
    }

    /// Processes whose outputs are consumed by `id`.
    pub fn predecessors(&self, id: ProcessId) -> &[ProcessId] {
        &self.nodes.get(id).predecessors
    }

    /// Processes that consume outputs of `id`.
    pub fn successors(&self, id: ProcessId) -> &[ProcessId] {
        &self.nodes.get(id).successors
    }

    /// Number of processes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// true if no process produces this signal.
    pub fn is_input(&self, sig: SignalId) -> bool {
        self.producers.get(sig).is_empty()
    }

    /// true if no process consumes this signal.
    pub fn is_output(&self, sig: SignalId) -> bool {
        self.consumers.get(sig).is_empty()
    }

    /// Signals that no process produces.
    pub fn inputs(&self) -> Vec<SignalId> {
        self.producers.ids().filter(|s| self.is_input(*s)).collect()
    }

    /// Signals that no process consumes.
    pub fn outputs(&self) -> Vec<SignalId> {
        self.consumers.ids().filter(|s| self.is_output(*s)).collect()
    }
}

/// Resolve each process's `ins` and `outs` to signal ids.
/// All unresolvable references are reported together.
fn resolve_nodes(wf: &Workflow) -> Result<IdVec<ProcessId, Node>> {
    let names = wf.signal_names();
    let mut errors = Errors::default();
    let mut nodes = IdVec::with_capacity(wf.num_processes());

    for id in wf.process_ids() {
        let process = wf.process(id);
        let node = Node {
            ins: resolve_refs(wf, &names, &process.ins, id, &mut errors),
            outs: resolve_refs(wf, &names, &process.outs, id, &mut errors),
            ..Default::default()
        };
        nodes.push(node);
    }

    errors.print_recap("resolving process signals")?;
    Ok(nodes)
}

fn resolve_refs(
    wf: &Workflow,
    names: &HashMap<String, SignalId>,
    refs: &[SignalRef],
    id: ProcessId,
    errors: &mut Errors,
) -> Vec<SignalId> {
    let mut resolved = Vec::with_capacity(refs.len());
    for r in refs {
        match r.resolve(names, wf.num_signals()) {
            Some(sig) => resolved.push(sig),
            None => errors.add(
                Error::SignalNotFound(r.to_string(), wf.process(id).name.clone(), id.to_string())
                    .into(),
            ),
        }
    }
    resolved
}

/// Everyone attached to any of `signals` in the `by_signal` table.
fn collect_neighbours(
    signals: &[SignalId],
    by_signal: &IdVec<SignalId, Vec<ProcessId>>,
) -> Vec<ProcessId> {
    let mut neighbours: Vec<ProcessId> = signals
        .iter()
        .flat_map(|sig| by_signal.get(*sig).iter().copied())
        .collect();
    neighbours.sort_unstable();
    neighbours.dedup();
    neighbours
}

/// Kahn's algorithm. The queue is seeded with root processes in document order.
/// If the result is shorter than `nodes`, the remaining processes are on or behind a cycle.
fn topological_order(nodes: &IdVec<ProcessId, Node>) -> Vec<ProcessId> {
    let mut in_degree: IdVec<ProcessId, usize> =
        nodes.iter().map(|n| n.predecessors.len()).collect::<Vec<_>>().into();
    let mut queue: VecDeque<ProcessId> = nodes
        .iter_enumerated()
        .filter(|(_, n)| n.is_root())
        .map(|(id, _)| id)
        .collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(id) = queue.pop_front() {
        log::trace!("Ordering {}", id.to_string().cyan());
        order.push(id);
        for succ in &nodes.get(id).successors {
            let degree = in_degree.get_mut(*succ);
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(*succ);
            }
        }
    }

    order
}

fn cycle_error(wf: &Workflow, nodes: &IdVec<ProcessId, Node>, order: &[ProcessId]) -> Error {
    let mut ordered = IdVec::<ProcessId, bool>::fill(false, nodes.len());
    for id in order {
        *ordered.get_mut(*id) = true;
    }
    let stuck: Vec<ProcessId> = ordered
        .iter_enumerated()
        .filter(|(_, done)| !**done)
        .map(|(id, _)| id)
        .collect();

    let mut names: Vec<String> = stuck
        .iter()
        .take(MAX_CYCLE_NAMES)
        .map(|id| format!("{} ({id})", wf.process(*id).name))
        .collect();
    if stuck.len() > MAX_CYCLE_NAMES {
        names.push(format!("and {} more", stuck.len() - MAX_CYCLE_NAMES));
    }
    Error::CyclicWorkflow(stuck.len(), names.join(", "))
}
