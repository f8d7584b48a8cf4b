pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "supportcrew",
    about = "AI Learning Center support crew CLI",
    long_about = "Ask the three-tier support crew a question, inspect effective configuration, and run readiness checks.",
    after_help = "Examples:\n  supportcrew ask \"How long do refunds take?\"\n  supportcrew config\n  supportcrew doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the support crew on a question (prompts on stdin when omitted)")]
    Ask {
        #[arg(help = "The question to answer; read interactively when absent")]
        query: Option<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, the policy document, and provider prerequisites")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Ask { query } => commands::ask::run(query),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
