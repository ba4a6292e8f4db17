use std::path::PathBuf;

use anyhow::Context;
use carportkit::{copy_to_clipboard, init_json_logging, init_logging, restore};
use carportkit_layout::model::{StoragePosition, StorageRoomConfig};
use carportkit_layout::sharing::generate_share_url;
use carportkit_layout::{ConfigStore, Configuration};
use carportkit_settings::{Config, ConfigPersistence};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

/// Carport layout engine
#[derive(Parser, Debug)]
#[command(name = "carportkit", version)]
#[command(about = "Derive carport layouts, share and restore configurations")]
struct Cli {
    /// Settings file (.toml or .json); defaults to the platform config directory
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the structural posts of a carport
    Posts {
        /// Width in meters
        #[arg(long, default_value_t = 4.0)]
        width: f64,

        /// Depth in meters
        #[arg(long, default_value_t = 6.0)]
        depth: f64,

        /// Add a storage room on this side
        #[arg(long)]
        storage: Option<StorageSide>,

        /// Storage room depth in meters
        #[arg(long, default_value_t = 1.5)]
        storage_depth: f64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a share link for the stored configuration
    Share {
        /// Copy the link to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
    },

    /// Apply a configuration from a share link and store it
    Load {
        /// The share link
        url: String,
    },

    /// Store the default configuration
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StorageSide {
    Back,
    Left,
    Right,
}

impl From<StorageSide> for StoragePosition {
    fn from(side: StorageSide) -> Self {
        match side {
            StorageSide::Back => StoragePosition::Back,
            StorageSide::Left => StoragePosition::Left,
            StorageSide::Right => StoragePosition::Right,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        init_json_logging()?;
    } else {
        init_logging()?;
    }

    let settings_path = cli.settings.unwrap_or_else(Config::default_path);
    let settings = Config::load_or_default(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;
    let persistence = ConfigPersistence::from_settings(&settings.storage);

    match cli.command {
        Command::Posts {
            width,
            depth,
            storage,
            storage_depth,
            json,
        } => {
            let mut store = ConfigStore::new();
            store.set_width(width);
            store.set_depth(depth);
            if let Some(side) = storage {
                store.set_storage_room(StorageRoomConfig {
                    enabled: true,
                    position: side.into(),
                    depth: storage_depth,
                });
            }
            let posts = store.structural_posts();
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                for post in &posts {
                    println!("{:<18} {:>7.3} {:>7.3}", post.id.as_str(), post.x, post.z);
                }
            }
        }
        Command::Share { copy } => {
            let config = persistence.load().unwrap_or_default();
            let url =
                generate_share_url(&settings.share.base_url, &settings.share.param_name, &config)?;
            if copy && copy_to_clipboard(&url) {
                println!("Share link copied to clipboard");
            } else {
                println!("{}", url);
            }
        }
        Command::Load { url } => {
            let mut store = ConfigStore::new();
            let restored = restore(
                &mut store,
                &persistence,
                Some(&url),
                &settings.share.param_name,
            );
            persistence
                .save(&store.config())
                .with_context(|| format!("Failed to save {}", persistence.path().display()))?;
            info!("Stored configuration from {:?}", restored.source);
            if let Some(url) = restored.url {
                println!("{}", url);
            }
        }
        Command::Reset => {
            persistence.save(&Configuration::default())?;
            info!("Stored default configuration");
        }
    }

    Ok(())
}
