use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "timedquiz", version, about = "Terminal-based timed quiz")]
pub struct Cli {
    /// Question bank file or directory [default: built-in quiz]
    pub quiz: Option<PathBuf>,

    /// Print previous attempts without entering the TUI
    #[arg(long)]
    pub history: bool,

    /// Delete all recorded attempts
    #[arg(long)]
    pub clear: bool,

    /// Export recorded attempts to file (for backup)
    #[arg(long, value_name = "path")]
    pub export: Option<PathBuf>,

    /// Attempt history file [default: platform data dir]
    #[arg(long, value_name = "path")]
    pub history_file: Option<PathBuf>,

    /// Config file [default: platform config dir]
    #[arg(long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
