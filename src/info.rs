use anyhow::{Context, Result};
use serde::Serialize;

use traverse::{
    apply_partitions, assign_phases, partitioning_per_phase, DependencyGraph, PartitionMap,
};
use workflow::Workflow;

/// Structural summary of a workflow, plus the workflow itself
/// annotated with phases (and partitions, if any).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WfInfo {
    pub n_levels: u32,
    pub level_counts: Vec<usize>,
    /// `[phase - 1][partition - 1]`; absent if the workflow isn't partitioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioning_per_phase: Option<Vec<Vec<usize>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wfjson: Option<Workflow>,
}

impl WfInfo {
    /// Drop the annotated workflow, keeping only the statistics.
    pub fn summary(mut self) -> Self {
        self.wfjson = None;
        self
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("while serializing workflow info")
    }
}

/// Assign phases to every process in `wf`, apply `partitions` if given,
/// and count processes per phase (and per partition).
pub fn analyze(mut wf: Workflow, partitions: Option<&PartitionMap>) -> Result<WfInfo> {
    let graph = DependencyGraph::build(&wf)
        .with_context(|| format!("while building dependency graph of \"{}\"", wf.name))?;
    log::info!(
        "Workflow \"{}\" has {} input and {} output signals",
        wf.name,
        graph.inputs().len(),
        graph.outputs().len()
    );
    let levels = assign_phases(&mut wf, &graph);

    if let Some(partitions) = partitions {
        apply_partitions(&mut wf, partitions).context("while applying partition map")?;
    }

    let histogram = partitioning_per_phase(&wf, &levels)?;

    Ok(WfInfo {
        n_levels: levels.n_levels,
        level_counts: levels.level_counts,
        partitioning_per_phase: histogram.map(|h| h.into_inner()),
        wfjson: Some(wf),
    })
}
