use clap::{ArgAction, Parser};

const INFO_CMD_NAME: &str = "hflow-info";
const CONVERT_CMD_NAME: &str = "hflow-convert-wfcommons";

/// Reads a HyperFlow workflow and reports its levels (phases),
/// optionally its partitioning per phase, along with the annotated workflow.
#[derive(Parser, Debug)]
#[command(name = INFO_CMD_NAME, version, long_about = None)]
pub struct InfoArgs {
    /// Workflow JSON file
    #[arg(value_name = "WORKFLOW")]
    pub workflow: String,

    /// Process-to-partition mapping (JSON array, or one 0-based partition per line)
    #[arg(short, long, value_name = "FILE")]
    #[arg(env = "HFLOW_PARTMAP")]
    pub partmap: Option<String>,

    /// Directory with workflow files; signal sizes are taken from matching files
    #[arg(short, long, value_name = "DIR")]
    #[arg(env = "HFLOW_FILEDIR")]
    pub filedir: Option<String>,

    /// Print only the statistics, without the annotated workflow
    #[arg(short, long)]
    pub summary: bool,

    /// Print additional debugging info (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Converts a WfCommons trace to HyperFlow workflow JSON format.
#[derive(Parser, Debug)]
#[command(name = CONVERT_CMD_NAME, version, long_about = None)]
pub struct ConvertArgs {
    /// WfCommons trace JSON file
    #[arg(value_name = "WFCOMMONS_JSON_FILE")]
    pub trace: String,

    /// Print additional debugging info (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_info_args() {
        let args = InfoArgs::parse_from(["hflow-info", "wf.json", "-p", "parts.txt", "-vv", "-s"]);
        assert_eq!("wf.json", args.workflow);
        assert_eq!(Some("parts.txt".to_owned()), args.partmap);
        assert_eq!(2, args.verbose);
        assert!(args.summary);
    }

    #[test]
    fn test_convert_requires_trace() {
        assert!(ConvertArgs::try_parse_from(["hflow-convert-wfcommons"]).is_err());
        let args = ConvertArgs::parse_from(["hflow-convert-wfcommons", "trace.json"]);
        assert_eq!("trace.json", args.trace);
    }

    #[test]
    fn test_clap_config() {
        use clap::CommandFactory;
        InfoArgs::command().debug_assert();
        ConvertArgs::command().debug_assert();
    }
}
