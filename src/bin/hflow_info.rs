use colored::Colorize;

fn main() {
    if let Err(e) = hflow_wfinfo::run_info() {
        eprintln!("{}: {:?}", "ERROR".red(), e);
        std::process::exit(1);
    }
}
