mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use myday_server::{ServerConfig, TaskClient};
use myday_settings::MydaySettings;
use myday_store::{Database, SqliteTaskRepo};
use myday_telemetry::{LogFormat, TelemetryConfig};

use crate::cli::{render_tasks, title_from_words, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Command::Serve { config: None });
    run(TaskClient::new(cli.url), command).await
}

async fn serve(config_path: Option<&Path>) -> anyhow::Result<()> {
    let settings = match config_path {
        Some(path) => myday_settings::load_settings_from_path(path),
        None => myday_settings::load_settings(),
    }
    .context("failed to load settings")?;

    myday_telemetry::init_telemetry(&telemetry_config(&settings))?;

    tracing::info!("Starting myday server");

    let db = Database::connect(&settings.database.url).context("failed to open database")?;
    tracing::info!(path = %db.path().display(), "Database opened");
    let repo = Arc::new(SqliteTaskRepo::new(db));

    let config = ServerConfig {
        host: settings.server.host.clone(),
        port: settings.server.port,
    };
    let handle = myday_server::start(config, repo)
        .await
        .with_context(|| format!("failed to bind {}", settings.server.bind_addr()))?;

    tracing::info!(addr = %handle.local_addr(), url = %handle.base_url(), "myday server ready");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl+c")?;

    tracing::info!("Shutting down");
    handle.shutdown().await;
    Ok(())
}

fn telemetry_config(settings: &MydaySettings) -> TelemetryConfig {
    let defaults = TelemetryConfig::default();
    let log_level = myday_telemetry::parse_level(&settings.logging.level).unwrap_or_else(|| {
        eprintln!(
            "myday: unknown log level {:?}, using {}",
            settings.logging.level, defaults.log_level
        );
        defaults.log_level
    });

    let mut module_levels = defaults.module_levels;
    for (module, raw) in &settings.logging.modules {
        match myday_telemetry::parse_level(raw) {
            Some(level) => module_levels.push((module.clone(), level)),
            None => eprintln!("myday: ignoring unknown level {raw:?} for {module}"),
        }
    }

    TelemetryConfig {
        log_level,
        module_levels,
        format: if settings.logging.json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        },
    }
}

async fn run(client: TaskClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve { config } => return serve(config.as_deref()).await,
        Command::List => {}
        Command::Add { title } => {
            let task = client.create(title_from_words(&title)?).await?;
            println!("Task created: #{}", task.id);
        }
        Command::Done { id } => {
            client.set_completed(id, true).await?;
        }
        Command::Undo { id } => {
            client.set_completed(id, false).await?;
        }
        Command::Rename { id, title } => {
            client.edit_title(id, title_from_words(&title)?).await?;
            println!("Task updated!");
        }
        Command::Rm { id } => {
            let ack = client.delete(id).await?;
            println!("{}", ack.message);
        }
    }

    let tasks = client
        .list()
        .await
        .with_context(|| format!("failed to connect to {}", client.base_url()))?;
    print!("{}", render_tasks(&tasks));
    Ok(())
}
