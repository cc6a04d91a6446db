use anyhow::Result;
use clap::Parser;
use vibecheck::cli::{Cli, Commands};
use vibecheck::commands::analyze::{self, AnalyzeOptions};
use vibecheck::commands::init;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            inputs,
            text,
            mode,
            context,
            format,
            output,
            config,
            list_patterns,
        } => analyze::run(AnalyzeOptions {
            inputs,
            text,
            mode: mode.into(),
            context,
            format: format.map(Into::into),
            output,
            config,
            list_patterns,
        }),
        Commands::Init { force } => init::init_config(force),
    }
}
