use super::{Config, ServerConfig};
use crate::game::catalog::PlaylistEntry;

pub const DEFAULT_PLAYLIST_ID: &str = "14072713181";

/// Config written on first run.
pub fn defaults() -> Config {
    Config {
        server: ServerConfig {
            secret_key: generate_secret(),
            ..ServerConfig::default()
        },
        ..Config::default()
    }
}

pub fn playlists() -> Vec<PlaylistEntry> {
    [
        (DEFAULT_PLAYLIST_ID, "Default"),
        ("14089683421", "International Rock"),
        ("14094110361", "English Variety"),
        ("14094507901", "Spanish Variety"),
    ]
    .into_iter()
    .map(|(id, name)| PlaylistEntry {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

/// 256 random bits, hex encoded.
pub fn generate_secret() -> String {
    hex::encode(rand::random::<[u8; 32]>())
}
