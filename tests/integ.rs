use anyhow::Result;
use hflow_wfinfo::{App, ConvertApp, ConvertArgs, InfoArgs, WfInfo};
use std::path::Path;
use tempfile::tempdir;

// source -> left ----------> sink
//        -> mid -> right -->
const DIAMOND: &str = r#"{
    "name": "diamond",
    "processes": [
        {"name": "source", "type": "dataflow", "function": "f", "ins": ["in"], "outs": ["s_out"]},
        {"name": "left", "type": "dataflow", "function": "f", "ins": ["s_out"], "outs": ["left_out"]},
        {"name": "mid", "type": "dataflow", "function": "f", "ins": ["s_out"], "outs": ["mid_out"]},
        {"name": "right", "type": "dataflow", "function": "f", "ins": ["mid_out"], "outs": ["right_out"]},
        {"name": "sink", "type": "dataflow", "function": "f", "ins": ["left_out", "right_out"], "outs": ["result"],
         "config": {"executor": {"executable": "sink.sh", "args": []}}}
    ],
    "signals": [
        {"name": "in", "data": [{}]},
        {"name": "s_out"},
        {"name": "left_out"},
        {"name": "mid_out"},
        {"name": "right_out"},
        {"name": "result", "size": 3}
    ],
    "ins": ["in"],
    "outs": ["result"],
    "version": "1.0.0"
}"#;

fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_owned()
}

fn info_args(workflow: &Path) -> InfoArgs {
    InfoArgs {
        workflow: path_str(workflow),
        partmap: None,
        filedir: None,
        summary: false,
        verbose: 1,
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> Result<std::path::PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

fn run(args: InfoArgs) -> Result<WfInfo> {
    simple_logging::log_to_stderr(log::LevelFilter::Trace);
    let settings = args.try_into()?;
    let mut app = App::new(settings);
    app.analyze()
}

#[test]
fn test_levels() -> Result<()> {
    let dir = tempdir()?;
    let wf = write_file(dir.path(), "wf.json", DIAMOND)?;

    let info = run(info_args(&wf))?;
    assert_eq!(4, info.n_levels);
    assert_eq!(vec![1, 2, 1, 1], info.level_counts);
    assert_eq!(None, info.partitioning_per_phase);

    let out = serde_json::to_value(&info)?;
    let phases: Vec<_> = out["wfjson"]["processes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["phase"].as_u64().unwrap())
        .collect();
    assert_eq!(vec![1, 2, 2, 3, 4], phases);

    // everything we don't interpret comes back out unchanged:
    assert_eq!("1.0.0", out["wfjson"]["version"]);
    assert_eq!("sink.sh", out["wfjson"]["processes"][4]["config"]["executor"]["executable"]);
    assert_eq!(serde_json::json!([{}]), out["wfjson"]["signals"][0]["data"]);
    Ok(())
}

#[test]
fn test_partitions() -> Result<()> {
    let dir = tempdir()?;
    let wf = write_file(dir.path(), "wf.json", DIAMOND)?;
    let parts = write_file(dir.path(), "wf.part.2", "0\n0\n1\n1\n0\n")?;

    let mut args = info_args(&wf);
    args.partmap = Some(path_str(&parts));
    let info = run(args)?;

    let expected = vec![vec![1, 0], vec![1, 1], vec![0, 1], vec![1, 0]];
    assert_eq!(Some(expected), info.partitioning_per_phase);

    let out = serde_json::to_value(&info)?;
    assert_eq!(2, out["wfjson"]["processes"][2]["config"]["executor"]["partition"]);
    assert_eq!(1, out["wfjson"]["processes"][4]["config"]["executor"]["partition"]);
    Ok(())
}

#[test]
fn test_special_process_not_partitioned() -> Result<()> {
    let dir = tempdir()?;
    let text = DIAMOND.replace(
        r#"{"name": "left", "type": "dataflow""#,
        r#"{"name": "left", "type": "special""#,
    );
    let wf = write_file(dir.path(), "wf.json", &text)?;
    let parts = write_file(dir.path(), "parts.json", "[0, null, 1, 1, 0]")?;

    let mut args = info_args(&wf);
    args.partmap = Some(path_str(&parts));
    let info = run(args)?;

    let expected = vec![vec![1, 0], vec![0, 1], vec![0, 1], vec![1, 0]];
    assert_eq!(Some(expected), info.partitioning_per_phase);
    Ok(())
}

#[test]
fn test_missing_partition_fails() -> Result<()> {
    let dir = tempdir()?;
    let wf = write_file(dir.path(), "wf.json", DIAMOND)?;
    let parts = write_file(dir.path(), "parts.txt", "0 - 1 1 0")?;

    let mut args = info_args(&wf);
    args.partmap = Some(path_str(&parts));
    let e = run(args).unwrap_err();
    assert!(format!("{:?}", e).contains("No partition for process \"left\" (process:2)"));
    Ok(())
}

#[test]
fn test_file_sizes() -> Result<()> {
    let dir = tempdir()?;
    let wf = write_file(dir.path(), "wf.json", DIAMOND)?;
    let files = dir.path().join("files");
    std::fs::create_dir(&files)?;
    std::fs::write(files.join("result"), vec![b'x'; 1024])?;
    std::fs::write(files.join("stdout.log"), "not a signal")?;

    let mut args = info_args(&wf);
    args.filedir = Some(path_str(&files));
    let info = run(args)?;

    let wfjson = info.wfjson.unwrap();
    assert_eq!(Some(1024), wfjson.signals[5].size);
    assert_eq!(None, wfjson.signals[1].size);
    Ok(())
}

#[test]
fn test_cycle_fails() -> Result<()> {
    let dir = tempdir()?;
    let text = r#"{
        "name": "loop",
        "processes": [
            {"name": "a", "ins": [0], "outs": [1]},
            {"name": "b", "ins": [1], "outs": [0]}
        ],
        "signals": [{"name": "x"}, {"name": "y"}]
    }"#;
    let wf = write_file(dir.path(), "wf.json", text)?;

    let e = run(info_args(&wf)).unwrap_err();
    assert!(format!("{:?}", e).contains("Cyclic workflow"));
    Ok(())
}

#[test]
fn test_summary() -> Result<()> {
    let dir = tempdir()?;
    let wf = write_file(dir.path(), "wf.json", DIAMOND)?;

    let info = run(info_args(&wf))?.summary();
    let out: serde_json::Value = serde_json::from_str(&info.to_json_pretty()?)?;
    assert_eq!(4, out["nLevels"]);
    assert!(out.get("wfjson").is_none());
    Ok(())
}

#[test]
fn test_convert_then_analyze() -> Result<()> {
    let dir = tempdir()?;
    let trace = r#"{
        "name": "two-step",
        "workflow": {
            "makespan": 12.5,
            "jobs": [
                {"name": "split_ID00001", "files": [
                    {"name": "input.txt", "size": 100, "link": "input"},
                    {"name": "chunk", "size": 50, "link": "output"}
                ], "cores": 1},
                {"name": "merge_ID00002", "files": [
                    {"name": "chunk", "size": 50, "link": "input"},
                    {"name": "merged", "size": 40, "link": "output"}
                ], "cores": 2}
            ]
        }
    }"#;
    let trace_path = write_file(dir.path(), "trace.json", trace)?;

    let args = ConvertArgs {
        trace: path_str(&trace_path),
        verbose: 0,
    };
    let converted = ConvertApp::new(args.try_into()?).convert()?;
    let names: Vec<&str> = converted.processes.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(vec!["split", "merge"], names);

    let wf = write_file(dir.path(), "wf.json", &converted.to_json_pretty()?)?;
    let info = run(info_args(&wf))?;
    assert_eq!(vec![1, 1], info.level_counts);
    Ok(())
}
