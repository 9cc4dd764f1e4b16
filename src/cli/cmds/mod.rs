use crate::{Cli, Result};

mod add;
mod commit;
mod init;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(add::subcommand())
        .subcommand(commit::subcommand())
        .subcommand(init::subcommand())
}

pub(crate) fn dispatch(cli: &mut Cli) -> Result<()> {
    let matches = cli.arg_matches.clone();
    match matches.subcommand() {
        ("add", Some(m)) => add::run(cli, m),
        ("commit", Some(m)) => commit::run(cli, m),
        ("init", Some(m)) => init::run(cli, m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}
