use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};
use tracing::warn;

use tinyvcs::repo::{Error, Repo};

use crate::{Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("add")
        .about("Store file contents in the object database")
        .arg(
            Arg::with_name("file")
                .required(true)
                .multiple(true)
                .help("File(s) to store, relative to the current directory"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let repo = Repo::open(&cli.work_dir)?;

    let files: Vec<&str> = match args.values_of("file") {
        Some(values) => values.collect(),
        None => Vec::new(),
    };

    // A file that can't be stored is reported and skipped; the rest of the
    // batch still runs.
    for file in files {
        let path = cli.work_dir.join(file);
        match repo.hash_file(&path) {
            Ok(id) => writeln!(cli, "Added: {} ({})", file, id)?,
            Err(Error::FileNotFound(_)) => writeln!(cli, "File not found: {}", file)?,
            Err(err) => {
                warn!(file_name = file, error = %err, "could not add file");
                writeln!(cli, "Failed to add: {} ({})", file, err)?
            }
        }
    }

    Ok(())
}
