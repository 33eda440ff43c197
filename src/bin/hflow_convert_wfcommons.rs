use colored::Colorize;

fn main() {
    if let Err(e) = hflow_wfinfo::run_convert() {
        eprintln!("{}: {:?}", "ERROR".red(), e);
        std::process::exit(1);
    }
}
