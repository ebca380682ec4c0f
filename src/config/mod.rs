use crate::game::catalog::PlaylistEntry;
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub deezer: DeezerConfig,
    pub game: GameConfig,
    pub playlists: Vec<PlaylistEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, e.g. "127.0.0.1:5000".
    pub bind: String,
    /// Signs session cookies. Generated on first run.
    pub secret_key: String,
    /// Idle time after which a player's session is forgotten.
    pub session_ttl_secs: u64,
    /// Upper bound on sessions kept in memory (least recently used go first).
    pub max_sessions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeezerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_attempts: usize,
    /// Played when a game is started without a playlist.
    pub default_playlist_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            deezer: DeezerConfig::default(),
            game: GameConfig::default(),
            playlists: defaults::playlists(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            secret_key: String::new(),
            session_ttl_secs: 24 * 60 * 60,
            max_sessions: 10_000,
        }
    }
}

impl Default for DeezerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deezer.com".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: crate::game::session::DEFAULT_MAX_ATTEMPTS,
            default_playlist_id: defaults::DEFAULT_PLAYLIST_ID.to_string(),
        }
    }
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    write_config(&path, cfg)
}

fn write_config(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    // The file holds the cookie signing key.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj =
        ProjectDirs::from("dev", "songdle", "songdle").context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

/// Read the config file, creating it with defaults when missing. A blank
/// `secret_key` is replaced by a fresh one and written back.
pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let cfg = defaults::defaults();
        write_config(&path, &cfg).context("write default config")?;
        tracing::info!(path = %path.display(), "created default config");
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let mut cfg =
        toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    if cfg.server.secret_key.trim().is_empty() {
        cfg.server.secret_key = defaults::generate_secret();
        write_config(&path, &cfg).context("store generated secret")?;
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("songdle-test-{}-{}", std::process::id(), name))
            .join("config.toml")
    }

    #[test]
    fn test_load_creates_defaults() {
        let path = temp_path("create");
        let _ = fs::remove_file(&path);

        let cfg = load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.game.max_attempts, 5);
        assert_eq!(cfg.game.default_playlist_id, "14072713181");
        assert_eq!(cfg.playlists.len(), 4);
        assert_eq!(cfg.server.secret_key.len(), 64);

        let again = load(Some(&path)).unwrap();
        assert_eq!(again.server.secret_key, cfg.server.secret_key);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "[game]\nmax_attempts = 3\n\n[[playlists]]\nid = \"1\"\nname = \"Mine\"\n",
        )
        .unwrap();

        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.game.max_attempts, 3);
        assert_eq!(cfg.game.default_playlist_id, "14072713181");
        assert_eq!(cfg.deezer.base_url, "https://api.deezer.com");
        assert_eq!(cfg.playlists.len(), 1);
        assert!(!cfg.server.secret_key.is_empty());

        // The generated secret was persisted.
        let reloaded = load(Some(&path)).unwrap();
        assert_eq!(reloaded.server.secret_key, cfg.server.secret_key);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_round_trips_catalog() {
        let path = temp_path("save");
        let mut cfg = defaults::defaults();
        cfg.playlists.push(PlaylistEntry {
            id: "42".into(),
            name: "Answers".into(),
        });
        save(&cfg, Some(&path)).unwrap();

        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded.playlists, cfg.playlists);
        let _ = fs::remove_file(&path);
    }
}
