use crate::deezer::models::Track;
use crate::deezer::playlist_id::extract_id;
use crate::game::error::GameError;
use async_trait::async_trait;

/// Where a round's tracks come from.
///
/// Implementations never fail: anything that goes wrong upstream is reported
/// as an empty list, which the game treats as [`GameError::EmptyPlaylist`].
#[async_trait]
pub trait TrackSource: Send + Sync {
    async fn fetch(&self, playlist_id: &str) -> Vec<Track>;
}

/// A playlist resolved from user input and fetched, ready to start a round.
#[derive(Debug, Clone)]
pub struct LoadedPlaylist {
    pub playlist_id: String,
    pub tracks: Vec<Track>,
}

/// Resolve `input` (bare id or playlist URL; blank means `default_id`) and
/// fetch its tracks.
pub async fn load_playlist(
    source: &dyn TrackSource,
    input: Option<&str>,
    default_id: &str,
) -> Result<LoadedPlaylist, GameError> {
    let playlist_id = match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => extract_id(text).ok_or_else(|| GameError::InvalidIdentifier {
            input: text.to_string(),
        })?,
        None => default_id.to_string(),
    };

    let tracks = source.fetch(&playlist_id).await;
    if tracks.is_empty() {
        return Err(GameError::EmptyPlaylist { playlist_id });
    }
    tracing::debug!(playlist_id = %playlist_id, tracks = tracks.len(), "loaded playlist");
    Ok(LoadedPlaylist {
        playlist_id,
        tracks,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory source that records every id it was asked for.
    #[derive(Default)]
    pub struct StaticSource {
        playlists: HashMap<String, Vec<Track>>,
        pub requests: Mutex<Vec<String>>,
    }

    impl StaticSource {
        pub fn with(mut self, playlist_id: &str, tracks: Vec<Track>) -> Self {
            self.playlists.insert(playlist_id.to_string(), tracks);
            self
        }
    }

    #[async_trait]
    impl TrackSource for StaticSource {
        async fn fetch(&self, playlist_id: &str) -> Vec<Track> {
            if let Ok(mut reqs) = self.requests.lock() {
                reqs.push(playlist_id.to_string());
            }
            self.playlists.get(playlist_id).cloned().unwrap_or_default()
        }
    }

    pub fn track(id: i64, title: &str, artist: &str) -> Track {
        Track {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            album: format!("{title} (album)"),
            duration: 185,
            preview_url: format!("https://cdn.example/{id}.mp3"),
        }
    }
}
