//! Small workflows for tests.

use workflow::{Process, Signal, SignalRef, Workflow};

/// Build a workflow from signal names and `(name, ins, outs)` process specs.
pub fn wf_from(signals: &[&str], processes: &[(&str, &[usize], &[usize])]) -> Workflow {
    let refs = |idxs: &[usize]| -> Vec<SignalRef> {
        idxs.iter().map(|i| SignalRef::Index(*i)).collect()
    };
    Workflow {
        name: "test".to_owned(),
        signals: signals.iter().map(|s| Signal::new(*s, None)).collect(),
        processes: processes
            .iter()
            .map(|(name, ins, outs)| Process {
                ins: refs(*ins),
                outs: refs(*outs),
                ..Process::new(*name)
            })
            .collect(),
        ..Default::default()
    }
}

/// `k` processes, each consuming the previous one's output.
pub fn chain(k: usize) -> Workflow {
    let names: Vec<String> = (0..=k).map(|i| format!("sig{i}")).collect();
    let names: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
    let ins: Vec<[usize; 1]> = (0..k).map(|i| [i]).collect();
    let outs: Vec<[usize; 1]> = (0..k).map(|i| [i + 1]).collect();
    let procs: Vec<String> = (0..k).map(|i| format!("p{i}")).collect();
    let specs: Vec<(&str, &[usize], &[usize])> = (0..k)
        .map(|i| (procs[i].as_str(), &ins[i][..], &outs[i][..]))
        .collect();
    wf_from(&names, &specs)
}

/// source feeds "left" and "mid"; "mid" feeds "right"; sink reads "left" and "right".
/// The two branches into the sink have different depths.
pub fn diamond() -> Workflow {
    wf_from(
        &["in", "s_out", "left_out", "mid_out", "right_out", "result"],
        &[
            ("source", &[0], &[1]),
            ("left", &[1], &[2]),
            ("mid", &[1], &[3]),
            ("right", &[3], &[4]),
            ("sink", &[2, 4], &[5]),
        ],
    )
}
