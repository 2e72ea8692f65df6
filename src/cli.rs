use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zimbib_config::Config;
use zimbib_sync::Mode;

/// Synchronize a BibTeX library into a Zim notebook.
#[derive(Debug, Parser)]
#[command(name = "zimbib", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file, read on top of the user configuration.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of the Zim notebook.
    #[arg(long, global = true)]
    pub notebook: Option<PathBuf>,

    /// Root namespace of the bibliography pages.
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// BibTeX file to read.
    #[arg(long, global = true)]
    pub bibfile: Option<String>,

    /// Read the notebook but do not write any page.
    #[arg(long, short = 'n', global = true)]
    pub dry_run: bool,

    /// Log debug events.
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Rewrite the root page with the library statistics and folder index.
    Load,
    /// Write one page per bibliography entry.
    Import,
    /// Run whatever the configuration enables (`summary`, `entries`).
    Sync,
}
impl Command {
    pub fn mode(self, config: &Config) -> Mode {
        match self {
            Self::Load => Mode::SUMMARY,
            Self::Import => Mode::ENTRIES,
            Self::Sync => Mode { summary: config.summary, entries: config.entries },
        }
    }
}

impl Cli {
    /// Command line flags override every configuration layer.
    pub fn apply(&self, config: &mut Config) {
        if let Some(notebook) = &self.notebook {
            config.notebook = Some(notebook.clone());
        }
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(bibfile) = &self.bibfile {
            config.bibfile = bibfile.clone();
        }
    }
}
