use std::io;

use clap::Parser;
use tagfs_cli::Args;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let stdout = io::stdout();
    if let Err(e) = tagfs_cli::run(&args, &mut stdout.lock()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
