use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use schemars::schema_for;

use whosin::MemoryStore;
use whosin::config::Config;
use whosin::error::ExitError;
use whosin::session::ChatSession;
use whosin::telemetry;

#[derive(Debug, Parser)]
#[command(name = "whosin", version, about = "Roll call bot for group chats")]
struct Cli {
    /// Config file (defaults to .whosin.toml or .whosin.json in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a chat session over stdin/stdout against an in-memory store
    Chat(ChatArgs),
    /// Print the JSON Schema for .whosin.toml
    Schema,
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Chat(_) => "chat",
            Self::Schema => "schema",
        }
    }
}

#[derive(Debug, Args)]
struct ChatArgs {
    /// Chat id to use (overrides [chat] id)
    #[arg(long, allow_hyphen_values = true)]
    chat_id: Option<i64>,

    /// Name used for lines without a `name:` prefix
    #[arg(long, default_value = "me")]
    username: String,
}

impl ChatArgs {
    fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let chat_id = self.chat_id.unwrap_or(config.chat.id);
        tracing::info!(chat_id, bot = %config.bot.name, "starting chat session");

        let mut session =
            ChatSession::new(MemoryStore::new(), chat_id, &config.bot.name, &self.username);
        session.run(io::stdin().lock(), io::stdout().lock())
    }
}

fn run_schema() -> anyhow::Result<()> {
    let schema = schema_for!(Config);
    let json = serde_json::to_string_pretty(&schema)?;
    println!("{json}");
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().map_err(|e| ExitError::Other(e.to_string()))?;
    let config = Config::resolve(cli.config.as_deref(), &cwd)?;
    let _installed = telemetry::init(&config.log);

    let _span = tracing::info_span!("cli", name = cli.command.name()).entered();

    match &cli.command {
        Commands::Chat(args) => args.execute(&config),
        Commands::Schema => run_schema(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(exit_err) = e.downcast_ref::<ExitError>() {
                eprintln!("error: {exit_err}");
                exit_err.exit_code()
            } else {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        }
    }
}
