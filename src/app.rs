use std::path::Path;

use anyhow::{Context, Result};

use traverse::PartitionMap;
use workflow::Workflow;

use crate::annotate::annotate_sizes;
use crate::fs::Fs;
use crate::info::{analyze, WfInfo};
use crate::settings::{ConvertSettings, Settings};
use crate::ui::Ui;

/// This struct actually runs the `hflow-info` app.
pub struct App {
    /// Interpreted command line settings
    settings: Settings,
    /// Filesystem interface
    fs: Fs,
    /// User interface
    ui: Ui,
}

impl App {
    /// Create a new `App`.
    pub fn new(settings: Settings) -> Self {
        let ui = Ui::new(settings.verbose);
        Self { settings, fs: Fs::new(), ui }
    }

    /// Run the app, printing the workflow info as JSON to stdout.
    pub fn run(mut self) -> Result<()> {
        let summary = self.settings.summary;
        let mut info = self.analyze()?;
        if summary {
            info = info.summary();
        }
        println!("{}", info.to_json_pretty()?);
        Ok(())
    }

    /// Load the workflow and partition map, compute phases and partitioning,
    /// and annotate signal sizes from the file directory if there is one.
    pub fn analyze(&mut self) -> Result<WfInfo> {
        let mut strbuf = String::with_capacity(0); // will be resized later.

        let wf = self.load_workflow(&mut strbuf)?;
        let partitions = match &self.settings.partmap {
            Some(path) => Some(self.load_partition_map(path, &mut strbuf)?),
            None => None,
        };

        self.ui.verbose_progress("Analyzing workflow");
        self.ui.start_timer();
        let mut info = analyze(wf, partitions.as_ref())?;
        self.ui.done();
        self.ui.print_elapsed("Analyzing workflow")?;

        if self.settings.verbose > 0 {
            eprintln!(
                "Workflow has {} levels with {:?} processes per level.",
                info.n_levels, info.level_counts
            );
        }

        if let (Some(dir), Some(wf)) = (&self.settings.filedir, info.wfjson.as_mut()) {
            self.ui.verbose_progress_debug("Reading file sizes from", dir);
            let matched = annotate_sizes(wf, &self.fs, dir)?;
            self.ui.done();
            self.ui.verbose_msg(&format!("Found {} workflow files.", matched));
        }

        Ok(info)
    }

    fn load_workflow(&self, strbuf: &mut String) -> Result<Workflow> {
        let path = &self.settings.workflow;
        self.ui.verbose_progress_debug("Reading workflow file", path);
        self.fs
            .read_to_buf(path, strbuf)
            .with_context(|| format!("while reading workflow file {:?}", path))?;
        let wf = Workflow::from_json(strbuf.as_str())
            .with_context(|| format!("while parsing workflow file {:?}", path))?;
        self.ui.done();

        if self.settings.verbose > 0 {
            eprintln!(
                "Loaded workflow \"{}\" with {} processes and {} signals.",
                wf.name,
                wf.num_processes(),
                wf.num_signals()
            );
        }
        Ok(wf)
    }

    fn load_partition_map(&self, path: &Path, strbuf: &mut String) -> Result<PartitionMap> {
        self.ui.verbose_progress_debug("Reading partition map", path);
        self.fs
            .read_to_buf(path, strbuf)
            .with_context(|| format!("while reading partition map {:?}", path))?;
        let map = strbuf
            .parse::<PartitionMap>()
            .with_context(|| format!("while parsing partition map {:?}", path))?;
        self.ui.done();
        Ok(map)
    }
}

/// This struct runs the `hflow-convert-wfcommons` app.
pub struct ConvertApp {
    settings: ConvertSettings,
    fs: Fs,
    ui: Ui,
}

impl ConvertApp {
    pub fn new(settings: ConvertSettings) -> Self {
        let ui = Ui::new(settings.verbose);
        Self { settings, fs: Fs::new(), ui }
    }

    /// Convert the trace and print the HyperFlow workflow as JSON to stdout.
    pub fn run(self) -> Result<()> {
        let wf = self.convert()?;
        println!("{}", wf.to_json_pretty()?);
        Ok(())
    }

    pub fn convert(&self) -> Result<Workflow> {
        let path = &self.settings.trace;
        let mut strbuf = String::with_capacity(0);
        self.ui.verbose_progress_debug("Reading trace file", path);
        self.fs
            .read_to_buf(path, &mut strbuf)
            .with_context(|| format!("while reading trace file {:?}", path))?;
        self.ui.done();

        self.ui.verbose_progress("Converting trace");
        let wf = wfcommons::convert_str(&strbuf)
            .with_context(|| format!("while converting trace file {:?}", path))?;
        self.ui.done();
        Ok(wf)
    }
}
