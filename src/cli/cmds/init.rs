use std::io::Write;

use clap::{App, Arg, ArgMatches, SubCommand};

use tinyvcs::repo::{InitOutcome, Repo};

use crate::{Cli, Result};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty repository")
        .arg(
            Arg::with_name("directory")
                .help("Directory to initialize (defaults to the current directory)"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let path = match args.value_of("directory") {
        Some(dir) => cli.work_dir.join(dir),
        None => cli.work_dir.clone(),
    };

    match Repo::init(&path)? {
        InitOutcome::Created(_) => {
            writeln!(cli, "Initialized empty repository in {}", path.display())?
        }
        InitOutcome::AlreadyInitialized => {
            writeln!(cli, "Repository already exists in {}", path.display())?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::Cli;

    #[test]
    fn init_current_dir() {
        let dir = TempDir::new().unwrap();

        let stdout = Cli::run_with_args(dir.path(), vec!["init"]).unwrap();
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            format!("Initialized empty repository in {}\n", dir.path().display())
        );

        assert_eq!(
            fs::read_to_string(dir.path().join(".vcs/HEAD")).unwrap(),
            "ref: refs/heads/master\n"
        );
    }

    #[test]
    fn init_named_dir() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("project");

        let stdout = Cli::run_with_args(dir.path(), vec!["init", "project"]).unwrap();
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            format!("Initialized empty repository in {}\n", target.display())
        );
        assert!(target.join(".vcs/objects").is_dir());
    }

    #[test]
    fn init_twice() {
        let dir = TempDir::new().unwrap();
        Cli::run_with_args(dir.path(), vec!["init"]).unwrap();

        let stdout = Cli::run_with_args(dir.path(), vec!["init"]).unwrap();
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            format!("Repository already exists in {}\n", dir.path().display())
        );
    }

    #[test]
    fn error_too_many_args() {
        let dir = TempDir::new().unwrap();
        assert!(Cli::run_with_args(dir.path(), vec!["init", "a", "b"]).is_err());
    }
}
