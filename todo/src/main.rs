//! `todo` command-line entry point.
//!
//! ```text
//! todo add Buy milk
//! todo list --filter active
//! todo shell
//! ```

use anyhow::Context;
use clap::Parser;
use todo::cli::{self, Cli, Command};
use todo::{Config, TodoApp};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(data_dir) = cli.data_dir.clone() {
        config = config.with_data_dir(data_dir);
    }

    // Logs go to stderr so stdout only carries the list
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.as_str().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Configuration loaded"
    );

    let mut app = TodoApp::open(&config)
        .await
        .with_context(|| format!("failed to open todo list in {}", config.data_dir.display()))?;

    let mut stdout = std::io::stdout();
    let command = cli.command.unwrap_or(Command::List { filter: None });

    if command == Command::Shell {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        cli::run_shell(&mut app, stdin, &mut stdout, cli.json).await?;
    } else {
        let view = match command.to_action() {
            Some(action) => app.dispatch(action).await?,
            None => {
                tracing::debug!("Nothing to dispatch");
                app.view().await
            },
        };
        cli::print_view(&mut stdout, &view, cli.json)?;
    }

    app.shutdown();
    Ok(())
}
