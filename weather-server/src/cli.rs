use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, warn};
use weather_core::{Config, WeatherLookup};

use crate::routes;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather relay HTTP server")]
pub struct Cli {
    /// Path to a TOML config file; defaults to the platform config directory.
    #[arg(long, env = "WEATHER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Interface to bind, overrides `server.host`.
    #[arg(long, env = "WEATHER_HOST", global = true)]
    pub host: Option<String>,

    /// Port to bind, overrides `server.port`.
    #[arg(long, env = "WEATHER_PORT", global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Print the effective configuration as TOML and exit.
    PrintConfig,

    /// Write the effective configuration to the config file and exit.
    InitConfig,
}

impl Cli {
    pub async fn run(mut self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        match self.command.take().unwrap_or(Command::Serve) {
            Command::Serve => serve(config).await,
            Command::PrintConfig => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
            Command::InitConfig => {
                let path = self.config_path()?;
                config.save(&path)?;
                println!("Config saved to {}", path.display());
                Ok(())
            }
        }
    }

    /// `--config` if given, otherwise the platform config file.
    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_file_path(),
        }
    }

    /// Config file (or defaults) with command-line overrides applied.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        Ok(config)
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let app = routes::router(WeatherLookup::from_config(&config));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        forecast = %config.forecast.base_url,
        geocoding = %config.geocoding.base_url,
        "Weather API listening on http://{addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with an error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C, running until killed: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
