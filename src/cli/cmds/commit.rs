use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};

use tinyvcs::repo::Repo;

use crate::{Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("commit")
        .about("Record the files in the current directory as a new commit")
        .arg(
            Arg::with_name("message")
                .short("m")
                .long("message")
                .value_name("message")
                .takes_value(true)
                .required(true)
                .help("Commit message"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let repo = Repo::open(&cli.work_dir)?;
    let message = args.value_of("message").unwrap_or_default();

    let outcome = repo.commit(message)?;

    writeln!(
        cli,
        "[{} {}] {}",
        outcome.branch().unwrap_or("detached HEAD"),
        outcome.id.to_short_string(7),
        message.lines().next().unwrap_or_default()
    )?;

    Ok(())
}
