use chaosmark_core::ChaosmarkError;
use clap::Parser;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, ChaosmarkError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    match args.command {
        Commands::Embed(embed) => embed.run(),
        Commands::Extract(extract) => extract.run(),
        Commands::Inspect(inspect) => inspect.run(),
        Commands::Verify(verify) => {
            if !verify.run()? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
