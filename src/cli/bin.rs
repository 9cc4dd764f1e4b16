use std::{
    env,
    error::Error,
    io::{self, Write},
};

use tracing_subscriber::EnvFilter;

mod app;
pub(crate) use app::Cli;

mod cmds;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[allow(unused_must_use)]
fn main() {
    // Keep this function as small as possible; everything else is reachable
    // from tests through `Cli::run_with_args`.

    init_logging();

    let work_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut cli = Cli {
        arg_matches: app::clap_app().get_matches(),
        work_dir,
        stdout: &mut stdout,
    };

    let r = cli.run();

    cli.flush();
    // Intentionally ignoring the result of this flush.

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            1
        }
    });
}

// Diagnostics go to stderr; RUST_LOG selects the level (default: warn).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
