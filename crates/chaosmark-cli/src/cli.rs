use clap::{Parser, Subcommand};
use dialoguer::Password;

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Embed(embed::EmbedArgs),
    Extract(extract::ExtractArgs),
    Inspect(inspect::InspectArgs),
    Verify(verify::VerifyArgs),
}

/// Prompts for the secret on the terminal, `None` if the prompt fails.
pub fn ask_for_secret(confirm: bool) -> Option<String> {
    let prompt = Password::new().with_prompt("Secret");
    let prompt = if confirm {
        prompt.with_confirmation("Repeat secret", "Error: the secrets don't match.")
    } else {
        prompt
    };

    prompt.interact().ok()
}
