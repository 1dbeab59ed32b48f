mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, check, list, update};
use ip2provider_common::config::Config;
use ip2provider_core::provider::ProviderTable;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    let cfg = Config {
        data_dir: commands.data_dir,
        quiet: commands.quiet,
        no_banner: commands.no_banner,
        verbose: commands.verbose,
        timeout: Duration::from_secs(commands.timeout),
    };

    logging::init_logging(&cfg);
    print::banner(cfg.no_banner, cfg.quiet);

    let providers = ProviderTable::builtin();

    let result = match commands.command {
        Commands::Update { providers: names, all } => {
            print::header("updating ip ranges", cfg.quiet);
            update::update(&names, all, &providers, &cfg).await
        }
        Commands::CheckIp { ip } => {
            print::header("checking address", cfg.quiet);
            check::check_ip(&ip, &providers, &cfg)
        }
        Commands::CheckFile { path } => {
            print::header("checking addresses", cfg.quiet);
            check::check_file(&path, &providers, &cfg)
        }
        Commands::List => {
            print::header("providers", cfg.quiet);
            list::list(&providers, &cfg)
        }
    };

    print::end_of_program(cfg.quiet);
    result
}
