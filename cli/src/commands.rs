pub mod check;
pub mod list;
pub mod update;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use ip2provider_common::config::DEFAULT_TIMEOUT;

#[derive(Parser)]
#[command(name = "ip2provider", version)]
#[command(about = "Find out which cloud provider an IP address belongs to.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the stored provider ranges
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Less decoration; repeat for even less
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Show debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// HTTP timeout in seconds when downloading feeds
    #[arg(long, global = true, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download and store the published ranges of one or more providers
    #[command(alias = "u")]
    Update {
        /// Providers to update (amazon, cloudflare, github, google, openai, microsoft)
        providers: Vec<String>,
        /// Update every provider
        #[arg(short, long)]
        all: bool,
    },
    /// Check if an IP belongs to any provider's range
    #[command(alias = "c")]
    CheckIp { ip: String },
    /// Check every IP in a file, one per line ('-' reads stdin)
    #[command(alias = "f")]
    CheckFile { path: PathBuf },
    /// List providers in precedence order with their stored ranges
    #[command(alias = "l")]
    List,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
