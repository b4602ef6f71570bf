//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = allernav_cli::run() {
        eprintln!("allernav: {err}");
        std::process::exit(1);
    }
}
