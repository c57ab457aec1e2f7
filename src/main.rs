use anyhow::{Context, Result};
use clap::Parser;
use lang_agent::agent;
use lang_agent::config::{self, Settings};
use lang_agent::llm;
use lang_agent::probe;

#[derive(Parser)]
#[command(
    name = "lang-agent",
    about = "English learning agents: inspect the model backend and agent declarations"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the resolved backend configuration and model reference
    Config,

    /// Print the coordinator and its specialists as JSON
    Agents,

    /// Print one agent's instruction
    Prompt {
        /// Agent name, e.g. teacher_agent
        name: String,
    },

    /// Check that the configured backend is reachable and the model is available
    Probe,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lang_agent=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("cannot read working directory")?;
    config::load_env_file(&cwd)?;
    let settings = Settings::from_env()?;

    match cli.command {
        Command::Config => {
            let json = serde_json::json!({
                "backend": &settings.backend,
                "delegation": settings.delegation,
                "model": llm::select_model(&settings.backend),
                "chat_client": llm::chat_client(&settings.backend),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
        Command::Agents => {
            let root = agent::build_root_agent(&settings);
            println!("{}", serde_json::to_string_pretty(&root)?);
            Ok(())
        }
        Command::Prompt { name } => {
            let root = agent::build_root_agent(&settings);
            let spec = root.find(&name).with_context(|| {
                format!("unknown agent '{name}' (known: {})", root.names().join(", "))
            })?;
            println!("{}", spec.instruction.trim());
            Ok(())
        }
        Command::Probe => {
            let client =
                probe::OllamaClient::new(concat!("lang-agent/", env!("CARGO_PKG_VERSION")))?;
            let report = probe::probe_backend(&settings.backend, &client).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
