use anyhow::{Context, Result};
use std::str::FromStr;

use workflow::{Process, ProcessId, Workflow};

use crate::{Error, Levels};

/// Marks an absent entry in the plain-text partition map format.
const ABSENT_ENTRY: &str = "-";

/// Assignment of processes to partitions, as produced by an external partitioner.
///
/// Entries are aligned with the workflow's process list and are 0-based;
/// they become 1-based partition ids when applied to the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionMap(Vec<Option<u32>>);

impl PartitionMap {
    pub fn new(entries: Vec<Option<u32>>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: ProcessId) -> Option<u32> {
        self.0.get(usize::from(id)).copied().flatten()
    }
}

impl From<Vec<Option<u32>>> for PartitionMap {
    fn from(entries: Vec<Option<u32>>) -> Self {
        Self(entries)
    }
}

/// Accepts either a JSON array of integers and nulls (`[0, 1, null, 1]`),
/// or whitespace-separated integers with `-` for absent entries,
/// which is what graph partitioners like METIS write (one entry per line).
impl FromStr for PartitionMap {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim_start();
        if trimmed.starts_with('[') {
            let entries: Vec<Option<u32>> =
                serde_json::from_str(trimmed).context("while parsing JSON partition map")?;
            return Ok(Self(entries));
        }

        let mut entries = Vec::with_capacity(s.len() / 2);
        for (i, tok) in s.split_whitespace().enumerate() {
            if tok == ABSENT_ENTRY {
                entries.push(None);
            } else {
                let p = tok
                    .parse::<u32>()
                    .map_err(|_| Error::InvalidPartitionEntry(tok.to_owned(), i + 1))?;
                entries.push(Some(p));
            }
        }
        Ok(Self(entries))
    }
}

/// Record a 1-based partition id on every process that isn't special.
///
/// Fails if the map doesn't have one entry per process,
/// or if it has no entry for a process that needs one.
pub fn apply_partitions(wf: &mut Workflow, partitions: &PartitionMap) -> Result<()> {
    if partitions.len() != wf.num_processes() {
        return Err(Error::PartitionMapLength(wf.num_processes(), partitions.len()).into());
    }

    for id in wf.process_ids() {
        let process = wf.process_mut(id);
        if process.is_special() {
            log::debug!("Not partitioning special process \"{}\" ({id})", process.name);
            continue;
        }
        let p = partitions
            .get(id)
            .ok_or_else(|| Error::MissingPartition(process.name.clone(), id.to_string()))?;
        let p = p
            .checked_add(1)
            .ok_or_else(|| Error::InvalidPartition(process.name.clone(), id.to_string()))?;
        process.set_partition(p);
    }

    Ok(())
}

/// Count of processes per phase per partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionHistogram {
    /// `counts[phase - 1][partition - 1]`
    counts: Vec<Vec<usize>>,
}

impl PartitionHistogram {
    /// Number of processes in the given phase and partition (both 1-based),
    /// or `None` if either is out of range.
    pub fn get(&self, phase: u32, partition: u32) -> Option<usize> {
        let row = self.counts.get((phase as usize).checked_sub(1)?)?;
        row.get((partition as usize).checked_sub(1)?).copied()
    }

    pub fn n_levels(&self) -> usize {
        self.counts.len()
    }

    pub fn n_partitions(&self) -> usize {
        self.counts.first().map_or(0, |row| row.len())
    }

    /// One row per phase, one column per partition.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn into_inner(self) -> Vec<Vec<usize>> {
        self.counts
    }
}

/// Build the phase × partition histogram from the phases and partitions recorded
/// on the workflow's processes.
///
/// Returns `None` if no process has a partition, i.e. partitioning was never done.
/// Special processes and processes without a partition are left out of the counts.
/// Phases must already have been assigned (see [`crate::assign_phases`]).
pub fn partitioning_per_phase(
    wf: &Workflow,
    levels: &Levels,
) -> Result<Option<PartitionHistogram>> {
    let mut n_partitions = 0;
    for (idx, process) in partitioned(wf) {
        match process.partition() {
            Some(0) => return Err(invalid_partition(process, idx).into()),
            Some(p) => n_partitions = n_partitions.max(p),
            None => {}
        }
    }

    if n_partitions == 0 {
        log::debug!("No partitions recorded on workflow \"{}\"", wf.name);
        return Ok(None);
    }

    let mut counts = vec![vec![0; n_partitions as usize]; levels.n_levels as usize];
    for (idx, process) in partitioned(wf) {
        let Some(partition) = process.partition() else {
            continue;
        };
        let phase = match process.phase {
            Some(phase) if phase >= 1 && phase <= levels.n_levels => phase,
            _ => {
                let id = ProcessId::from(idx);
                return Err(Error::PhaseNotAssigned(process.name.clone(), id.to_string()).into());
            }
        };
        counts[phase as usize - 1][partition as usize - 1] += 1;
    }

    log::info!(
        "Workflow \"{}\" spans {} partitions over {} levels",
        wf.name,
        n_partitions,
        levels.n_levels
    );

    Ok(Some(PartitionHistogram { counts }))
}

/// Processes that take part in partitioning, with their indices.
fn partitioned(wf: &Workflow) -> impl Iterator<Item = (usize, &Process)> {
    wf.processes.iter().enumerate().filter(|(_, p)| !p.is_special())
}

fn invalid_partition(process: &Process, idx: usize) -> Error {
    Error::InvalidPartition(process.name.clone(), ProcessId::from(idx).to_string())
}
