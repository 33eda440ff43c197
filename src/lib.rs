/// High-level command line apps
mod app;
/// Definition of command-line args
mod args;
/// Signal sizes from files on disk
mod annotate;
/// Filesystem operations
mod fs;
/// Workflow statistics document
mod info;
/// Command-line run settings
mod settings;
/// Text UI
mod ui;

// exported for tests:
pub use annotate::annotate_sizes;
pub use app::{App, ConvertApp};
pub use args::{ConvertArgs, InfoArgs};
pub use fs::Fs;
pub use info::{analyze, WfInfo};
pub use settings::{ConvertSettings, Settings};

/// Run the `hflow-info` command-line app.
pub fn run_info() -> Result<(), anyhow::Error> {
    use clap::Parser;
    let args = InfoArgs::parse();

    // INTERPRET SETTINGS ///////////////
    let settings: Settings = args.try_into()?;
    init_logging(settings.verbose);

    // RUN THE THING /////////////////
    let app = App::new(settings);
    app.run()?;

    Ok(())
}

/// Run the `hflow-convert-wfcommons` command-line app.
pub fn run_convert() -> Result<(), anyhow::Error> {
    use clap::Parser;
    let args = ConvertArgs::parse();

    let settings: ConvertSettings = args.try_into()?;
    init_logging(settings.verbose);

    ConvertApp::new(settings).run()?;

    Ok(())
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    simple_logging::log_to_stderr(log_level);
}
