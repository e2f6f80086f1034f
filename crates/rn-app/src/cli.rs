//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "remote-nav", about = "Replay a remote-control session against a console host")]
pub struct CliOptions {
    /// Session script to replay
    #[arg(value_name = "SESSION", required_unless_present = "print_config")]
    pub session: Option<PathBuf>,

    /// Key-map and prompt configuration (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Treat the runtime as a TV regardless of the script
    #[arg(long = "tv")]
    pub force_tv: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}
