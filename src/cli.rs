use clap::Parser;
use std::path::PathBuf;

use crate::output::DEFAULT_TREES_DIR;

const AFTER_HELP: &str = "\
Examples:
  projectmap ~/code/app                  save a listing into ./Trees
  projectmap -x node_modules -x '*.egg-info' --stdout
  projectmap --collapse-common -o app-tree.txt ~/code/app
  projectmap -i ~/code/app               browse, collapse folders, press s to save";

/// Log file name used by the browser when no --log-file is given.
pub const DEFAULT_LOG_FILE: &str = "projectmap.log";

/// Log sink other than stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    File(PathBuf),
    Discard,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "projectmap",
    version,
    about = "Snapshot a directory tree into a plain-text ASCII listing",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Root folder to map (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Write the listing to this file (must not exist yet)
    #[arg(short = 'o', long = "output", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Directory for timestamped listings when --output is not given
    #[arg(long = "trees-dir", default_value = DEFAULT_TREES_DIR)]
    pub trees_dir: PathBuf,

    /// Glob of folders to collapse (repeatable)
    #[arg(short = 'x', long = "collapse", action = clap::ArgAction::Append)]
    pub collapse: Vec<String>,

    /// Also collapse .git, node_modules, __pycache__, target and .venv
    #[arg(long = "collapse-common")]
    pub collapse_common: bool,

    /// Print the listing to stdout instead of saving it
    #[arg(long = "stdout")]
    pub stdout: bool,

    /// Browse the tree and toggle collapsed folders before saving
    #[arg(short = 'i', long = "interactive", conflicts_with = "stdout")]
    pub interactive: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Write logs to this file instead of stderr (the browser logs to a file in
    /// the temp directory when -v or RUST_LOG is given)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Disable colored output in the browser
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.quiet {
            self.verbose = 0;
        }
        // Respect NO_COLOR env var
        if std::env::var_os("NO_COLOR").is_some() {
            self.no_color = true;
        }
        self
    }

    /// Where logs go: an explicit file, a temp file while the browser owns the
    /// screen and logging was asked for, or nowhere for a quiet browser.
    /// `None` means stderr.
    pub fn log_destination(&self, rust_log_set: bool) -> Option<LogDestination> {
        if let Some(path) = &self.log_file {
            return Some(LogDestination::File(path.clone()));
        }
        if !self.interactive {
            return None;
        }
        if rust_log_set || self.verbose > 0 {
            Some(LogDestination::File(std::env::temp_dir().join(DEFAULT_LOG_FILE)))
        } else {
            Some(LogDestination::Discard)
        }
    }

    /// Default log filter derived from the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match (self.interactive, self.verbose) {
            (true, 0) => "off",
            (false, 0) => "warn",
            (_, 1) => "info",
            (_, 2) => "debug",
            _ => "trace",
        }
    }
}
