use crate::config::DeezerConfig;
use crate::deezer::models::{PlaylistResponse, RawTrack, Track};
use crate::game::source::TrackSource;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: String,
}

/// Client for the public (unauthenticated) Deezer catalog API.
#[derive(Debug, Clone)]
pub struct DeezerClient {
    inner: Arc<Inner>,
}

impl DeezerClient {
    const USER_AGENT: &'static str = concat!("songdle/", env!("CARGO_PKG_VERSION"));

    pub fn new(cfg: &DeezerConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(Self::USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: cfg.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Tracks of a playlist that carry a preview clip, in playlist order.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> anyhow::Result<Vec<Track>> {
        let v = self.playlist_raw(playlist_id).await?;
        parse_playlist(v).with_context(|| format!("playlist {playlist_id}"))
    }

    async fn playlist_raw(&self, playlist_id: &str) -> anyhow::Result<serde_json::Value> {
        let url = format!(
            "{}/playlist/{}",
            self.inner.base_url,
            urlencoding::encode(playlist_id)
        );

        let v: serde_json::Value = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .context("send playlist request")?
            .error_for_status()
            .context("playlist http status")?
            .json()
            .await
            .context("parse playlist json")?;
        Ok(v)
    }
}

#[async_trait]
impl TrackSource for DeezerClient {
    async fn fetch(&self, playlist_id: &str) -> Vec<Track> {
        match self.playlist_tracks(playlist_id).await {
            Ok(tracks) => {
                if tracks.is_empty() {
                    tracing::warn!(playlist_id, "playlist has no previewable tracks");
                }
                tracks
            }
            Err(e) => {
                tracing::warn!(playlist_id, error = %format!("{e:#}"), "deezer fetch failed");
                Vec::new()
            }
        }
    }
}

fn parse_playlist(v: serde_json::Value) -> anyhow::Result<Vec<Track>> {
    let resp: PlaylistResponse = serde_json::from_value(v).context("unexpected playlist shape")?;
    if let Some(err) = resp.error {
        anyhow::bail!("deezer error {}: {}", err.kind, err.message);
    }
    let page = resp.tracks.context("response has no tracks")?;
    Ok(page.data.into_iter().filter_map(parse_track).collect())
}

fn parse_track(v: serde_json::Value) -> Option<Track> {
    match serde_json::from_value::<RawTrack>(v) {
        Ok(raw) => raw.into_track(),
        Err(e) => {
            tracing::debug!(error = %e, "skipping malformed track");
            None
        }
    }
}
