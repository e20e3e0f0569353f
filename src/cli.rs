use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "termfolio",
    version,
    about = "Serve a tiny interactive menu to remote terminals over telnet"
)]
pub struct Cli {
    /// Config file (default: <config dir>/termfolio/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the listen address, e.g. 127.0.0.1:2323
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Validate the configuration, print a summary and exit
    #[arg(long)]
    pub check_config: bool,
}
