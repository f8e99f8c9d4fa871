use std::io;
use std::process;

use log::debug;

mod cli;
mod error;
mod format;
mod fs;
mod output;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opts = cli::parse_cli();

    debug!("{:?}", opts);

    let stdout = io::stdout();
    if let Err(e) = fs::ls_print_directory(&opts, stdout.lock()) {
        eprintln!("gs: {}", e);
        process::exit(1);
    }
}
