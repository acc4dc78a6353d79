use anyhow::{anyhow, Context, Result};
use clap::Parser;
use path_snake::game::GameConfig;
use path_snake::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "path_snake")]
#[command(version, about = "Snake on a wrapping grid with an A* path hint")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Simulation ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the path hint hidden
    #[arg(long)]
    no_hint: bool,

    /// Write logs to this file (the terminal is used by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_hz = tick_rate;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_hint {
            config.hint_enabled = false;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_tracing(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = cli.game_config()?;
    tracing::info!(
        width = config.grid_width,
        height = config.grid_height,
        tick_rate = config.tick_rate_hz,
        "starting path_snake"
    );

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_subscriber_install_is_reported() {
        let path = std::env::temp_dir().join(format!("path_snake_{}.log", std::process::id()));

        assert!(init_tracing(&path).is_ok());
        assert!(init_tracing(&path).is_err());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["path_snake", "--width", "12", "--no-hint"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.grid_width, 12);
        assert!(!config.hint_enabled);
    }

    #[test]
    fn test_invalid_flags_are_rejected() {
        let cli = Cli::parse_from(["path_snake", "--width", "3"]);
        assert!(cli.game_config().is_err());
    }
}
