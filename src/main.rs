use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use prwait::commands;
use prwait::config::{Config, GithubArgs, Window, WindowArgs};
use prwait::github::GitHubClient;

#[derive(Parser)]
#[command(name = "prwait")]
#[command(about = "Rank pull requests by how long they waited for first engagement")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    github: GithubArgs,

    #[command(flatten)]
    window: WindowArgs,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank in-window pull requests by time to first engagement (default)
    Report,

    /// List the repositories a report would cover
    Repos,
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_json);

    let config = Config::from_args(cli.github)?;
    let client = GitHubClient::new(&config.api_url, &config.token).context("Failed to set up GitHub client")?;

    match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => {
            let window = Window::from_args(cli.window)?;
            commands::report::run(&client, &config, window)
        }

        Commands::Repos => commands::repos::run(&client, &config),
    }
}
