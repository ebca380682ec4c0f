use crate::game::catalog::{self, PlaylistEntry};
use crate::game::{load_playlist, GuessOutcome, Hint, PlayedEntry};
use crate::web::error::ApiError;
use crate::web::AppState;
use axum::async_trait;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

/// The caller's session id, newly issued when the request carried none.
pub struct Player {
    pub id: Uuid,
    set_cookie: Option<String>,
}

impl Player {
    /// Headers to attach so the browser keeps a newly issued id.
    fn cookie(&self) -> Option<AppendHeaders<[(axum::http::HeaderName, String); 1]>> {
        self.set_cookie
            .clone()
            .map(|c| AppendHeaders([(SET_COOKIE, c)]))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Player {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(id) = state.sessions.player_from_headers(&parts.headers) {
            return Ok(Self { id, set_cookie: None });
        }
        let id = Uuid::new_v4();
        Ok(Self {
            id,
            set_cookie: Some(state.sessions.set_cookie(&id)),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    /// Playlist id or share link; blank plays the default playlist.
    pub playlist_id: Option<String>,
    pub playlist_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub message: &'static str,
    pub playlist_id: String,
    pub playlist_name: String,
}

#[derive(Debug, Deserialize)]
pub struct HintQuery {
    pub attempt: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
}

const INDEX_HTML: &str = include_str!("assets/index.html");
const APP_JS: &str = include_str!("assets/app.js");

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(INDEX_HTML.replace("{{playlists}}", &playlist_buttons(&state.config.playlists)))
}

fn playlist_buttons(playlists: &[PlaylistEntry]) -> String {
    playlists
        .iter()
        .map(|p| {
            format!(
                r#"<button class="playlist-btn" data-playlist-id="{}">{}</button>"#,
                escape_html(&p.id),
                escape_html(&p.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// GET /static/app.js
pub async fn app_js() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/javascript; charset=utf-8")], APP_JS)
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: "songdle",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /start
pub async fn start(
    State(state): State<AppState>,
    player: Player,
    Json(req): Json<StartRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let loaded = load_playlist(
        state.source.as_ref(),
        req.playlist_id.as_deref(),
        &state.config.game.default_playlist_id,
    )
    .await?;
    let playlist_id = loaded.playlist_id.clone();

    state.sessions.with_session(player.id, |s| {
        s.start(loaded.playlist_id, loaded.tracks, &mut rand::rng())
    })?;

    let playlist_name = catalog::display_name(
        &state.config.playlists,
        &playlist_id,
        req.playlist_name.as_deref(),
    );
    Ok((
        player.cookie(),
        Json(StartResponse {
            message: "Game started",
            playlist_id,
            playlist_name,
        }),
    ))
}

/// GET /hint?attempt=N
pub async fn hint(
    State(state): State<AppState>,
    player: Player,
    Query(q): Query<HintQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let attempt = q.attempt.unwrap_or(1);
    let hint: Hint = state.sessions.with_session(player.id, |s| s.hint(attempt))?;
    Ok((player.cookie(), Json(hint)))
}

/// POST /guess
pub async fn guess(
    State(state): State<AppState>,
    player: Player,
    Json(req): Json<GuessRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome: GuessOutcome = state
        .sessions
        .with_session(player.id, |s| s.submit_guess(&req.guess, &mut rand::rng()))?;
    Ok((player.cookie(), Json(outcome)))
}

/// GET /history
pub async fn history(State(state): State<AppState>, player: Player) -> impl IntoResponse {
    let history: Vec<PlayedEntry> = state
        .sessions
        .with_session(player.id, |s| s.history().to_vec());
    (player.cookie(), Json(history))
}

/// POST /reset
pub async fn reset(State(state): State<AppState>, player: Player) -> StatusCode {
    if state.sessions.remove(&player.id) {
        tracing::info!(player = %player.id, "session reset");
    }
    StatusCode::NO_CONTENT
}
