mod cli;
mod logging;

use crate::cli::Cli;
use clap::Parser;
use exn::ResultExt;
use std::process::ExitCode;
use std::sync::Arc;
use zimbib_config::Config;
use zimbib_notebook::{LocalNotebook, NotebookHandle, ReadOnlyNotebook};
use zimbib_sync::error::{ErrorKind, Result};
use zimbib_sync::{Context, SyncReport, synchronize};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(&cli) {
        Ok(report) => {
            println!("{report}");
            if report.is_success() { ExitCode::SUCCESS } else { ExitCode::from(1) }
        },
        Err(err) => {
            tracing::debug!("{err:?}");
            eprintln!("error: {}", *err);
            ExitCode::from(2)
        },
    }
}

fn run(cli: &Cli) -> Result<SyncReport> {
    let mut config = Config::load(cli.config.as_deref()).map_err(ErrorKind::config)?;
    cli.apply(&mut config);
    let mode = cli.command.mode(&config);
    let ctx = Context::from_config(&config)?.with_mode(mode);

    let Some(root) = config.notebook.as_deref() else {
        exn::bail!(ErrorKind::Config("no notebook directory configured (set `notebook`)".to_string()));
    };
    let root = std::path::absolute(root).or_raise(|| ErrorKind::Config(format!("invalid notebook path {}", root.display())))?;
    let name = root.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| "notebook".to_string());
    let notebook: NotebookHandle = Arc::new(LocalNotebook::new(name, &root).map_err(ErrorKind::notebook)?);
    let notebook: NotebookHandle = if cli.dry_run { Arc::new(ReadOnlyNotebook::new(notebook)) } else { notebook };

    tracing::info!(notebook = notebook.name(), root = %ctx.root, bibfile = %config.bibfile, ?mode, "Starting");
    synchronize(notebook.as_ref(), &ctx, &config.bibfile)
}
