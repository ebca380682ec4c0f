use thiserror::Error;

/// Failures surfaced by game operations. None of them is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The track source returned nothing playable for this playlist.
    #[error("could not load any playable track from playlist {playlist_id}")]
    EmptyPlaylist { playlist_id: String },

    /// A round operation was called before `start` (or after `reset`).
    #[error("no active round, start a game first")]
    NoActiveRound,

    /// Free text that is neither a numeric id nor a playlist URL.
    #[error("not a playlist id or link: {input:?}")]
    InvalidIdentifier { input: String },
}

impl GameError {
    /// Stable machine-readable kind, used by the HTTP layer.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::EmptyPlaylist { .. } => "empty_playlist",
            GameError::NoActiveRound => "no_active_round",
            GameError::InvalidIdentifier { .. } => "invalid_identifier",
        }
    }
}
