use std::io::Write;
use std::path::PathBuf;

#[cfg(test)]
use std::{ffi::OsString, path::Path};

use crate::{cmds, Result};

use clap::{crate_version, AppSettings, ArgMatches};

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    let app = clap::App::new("tinyvcs")
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands);

    cmds::add_subcommands(app)
}

pub(crate) struct Cli<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub work_dir: PathBuf,
    pub stdout: &'a mut dyn Write,
}

impl<'a> Cli<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(work_dir: &Path, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("tinyvcs"));

        let mut stdout = Vec::new();

        Cli {
            arg_matches: clap_app().get_matches_from_safe(args)?,
            work_dir: work_dir.to_path_buf(),
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }
}

impl<'a> Write for Cli<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}
