mod config;
mod deezer;
mod game;
mod play;
mod web;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "songdle", version, about = "Guess-the-song game over Deezer previews")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server (default).
    Serve {
        /// Listen address; overrides `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print the playable tracks of a playlist (headless).
    Playlist {
        /// Playlist id or share link.
        playlist: String,
    },
    /// Play in the terminal.
    Play {
        /// Playlist id or share link; the configured default when omitted.
        playlist: Option<String>,
    },
    /// Manage the playlists offered on the landing page.
    Catalog {
        #[command(subcommand)]
        cmd: CatalogCommand,
    },
}

#[derive(Debug, Subcommand)]
enum CatalogCommand {
    /// List configured playlists.
    List,
    /// Add a playlist, or rename it if already present.
    Add { playlist: String, name: String },
    /// Remove a playlist.
    Remove { playlist: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| cfg.server.bind.clone());
            tracing::info!(
                "Starting songdle v{} ({} catalog playlists)",
                env!("CARGO_PKG_VERSION"),
                cfg.playlists.len()
            );
            let source = Arc::new(deezer::DeezerClient::new(&cfg.deezer)?);
            let state = web::AppState::new(cfg, source);
            web::serve(state, &bind).await?;
        }
        Command::Playlist { playlist } => {
            let id = parse_playlist(&playlist)?;
            let client = deezer::DeezerClient::new(&cfg.deezer)?;
            let tracks = client.playlist_tracks(&id).await?;
            print_tracks(&tracks);
        }
        Command::Play { playlist } => {
            let client = deezer::DeezerClient::new(&cfg.deezer)?;
            play::run(&cfg, &client, playlist.as_deref()).await?;
        }
        Command::Catalog { cmd } => {
            let mut cfg = cfg;
            match cmd {
                CatalogCommand::List => {
                    for p in &cfg.playlists {
                        println!("{}  {}", p.id, p.name);
                    }
                    return Ok(());
                }
                CatalogCommand::Add { playlist, name } => {
                    let id = parse_playlist(&playlist)?;
                    if game::catalog::upsert(&mut cfg.playlists, &id, &name) {
                        println!("Added {id} ({name}).");
                    } else {
                        println!("Renamed {id} to {name}.");
                    }
                }
                CatalogCommand::Remove { playlist } => {
                    let id = parse_playlist(&playlist)?;
                    if !game::catalog::remove(&mut cfg.playlists, &id) {
                        println!("{id} is not in the catalog.");
                        return Ok(());
                    }
                    println!("Removed {id}.");
                }
            }
            config::save(&cfg, cli.config.as_deref()).context("save config")?;
        }
    }

    Ok(())
}

fn parse_playlist(input: &str) -> Result<String, game::GameError> {
    deezer::playlist_id::extract_id(input).ok_or_else(|| game::GameError::InvalidIdentifier {
        input: input.to_string(),
    })
}

fn print_tracks(tracks: &[deezer::models::Track]) {
    for (i, t) in tracks.iter().enumerate() {
        println!(
            "{:02}. {}  [{}, {}]  (id={})",
            i + 1,
            t.label(),
            t.album,
            game::hints::format_duration(t.duration),
            t.id
        );
    }
}
