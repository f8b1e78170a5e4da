//! Command-line demo of the agent-rs tool-message protocol

mod tools;

use agent_message::{ProtocolConfig, TurnOutcome};
use agent_utils::Config;
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Read;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "agent-cli")]
#[command(about = "Inspect and exercise the agent-rs tool-message protocol", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tool instructions an LLM would receive
    Instructions {
        /// Seed for few-shot example selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the function-calling definitions of the tools
    Definitions,
    /// Dispatch one turn of LLM output against the demo tools
    Dispatch {
        /// Reject fields the tool does not declare
        #[arg(long)]
        strict: bool,
        /// LLM output; read from stdin when omitted
        text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    agent_utils::init_tracing_with(&config);

    let args = Args::parse();
    info!(app = %config.app_name, command = ?args.command, "Starting agent-cli");

    match args.command {
        Command::Instructions { seed } => {
            let registry = tools::registry(ProtocolConfig::default())?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            println!("{}", registry.instructions(&mut rng)?);
        }
        Command::Definitions => {
            let registry = tools::registry(ProtocolConfig::default())?;
            println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
        }
        Command::Dispatch { strict, text } => {
            let protocol = if strict {
                ProtocolConfig::strict()
            } else {
                ProtocolConfig::default()
            };
            let registry = tools::registry(protocol)?;

            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read LLM output from stdin")?;
                    buf
                }
            };

            match registry.dispatch(&tools::DemoAgent, &text).await? {
                TurnOutcome::Dispatched(response) => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                TurnOutcome::NaturalLanguage(text) => {
                    eprintln!("No tool request found; passing text through");
                    println!("{text}");
                }
            }
        }
    }

    Ok(())
}
