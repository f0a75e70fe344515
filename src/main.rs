use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

use git_inspect::commands;
use git_inspect::error::InspectError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the repository (working tree or bare)
    repository: PathBuf,

    /// Branch whose head commit and snapshot history to print
    branch: Option<String>,
}

fn main() -> Result<()> {
    // Help and version keep clap's own output; every other parse failure is
    // the same fatal usage error.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => return Err(InspectError::Usage.into()),
    };

    match &cli.branch {
        Some(branch) => commands::log::execute(&cli.repository, branch)?,
        None => commands::branches::execute(&cli.repository)?,
    }

    Ok(())
}
