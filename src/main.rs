use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flicknroll::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flicknroll=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Login { email, password } => cli::commands::login(config, &email, password).await,
        Commands::Logout => cli::commands::logout(config).await,
        Commands::Whoami { format } => cli::commands::whoami(config, format).await,
        Commands::Open { path, format } => cli::commands::open(config, &path, format).await,
        Commands::Accounts { format } => cli::commands::accounts(format).await,
    };

    if let Err(e) = result {
        cli::error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}
