use serde::{Deserialize, Serialize};

/// A playable catalog track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// User-uploaded tracks carry negative ids.
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Whole seconds.
    pub duration: u32,
    pub preview_url: String,
}

impl Track {
    /// "title - artist", as revealed to the player and offered for autocomplete.
    pub fn label(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

/// `GET /playlist/{id}` response. Deezer answers errors with HTTP 200 and an
/// `error` object instead of `tracks`.
#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistResponse {
    pub tracks: Option<TrackPage>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackPage {
    /// Kept raw so one malformed entry doesn't sink the whole page.
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTrack {
    #[serde(default)]
    pub id: i64,
    pub title: Option<String>,
    pub duration: Option<u32>,
    pub preview: Option<String>,
    pub artist: Option<Named>,
    pub album: Option<Titled>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Named {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Titled {
    pub title: Option<String>,
}

const UNKNOWN: &str = "?";

impl RawTrack {
    /// Tracks without a preview clip cannot be played and are dropped.
    pub fn into_track(self) -> Option<Track> {
        let preview_url = self.preview.filter(|p| !p.is_empty())?;
        Some(Track {
            id: self.id,
            title: self.title.unwrap_or_else(|| UNKNOWN.to_string()),
            artist: self
                .artist
                .and_then(|a| a.name)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            album: self
                .album
                .and_then(|a| a.title)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            duration: self.duration.unwrap_or(0),
            preview_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_track_defaults_missing_fields() {
        let raw: RawTrack = serde_json::from_str(
            r#"{"id": 7, "preview": "https://cdn.example/7.mp3"}"#,
        )
        .unwrap();
        let t = raw.into_track().unwrap();
        assert_eq!(t.id, 7);
        assert_eq!(t.title, "?");
        assert_eq!(t.artist, "?");
        assert_eq!(t.album, "?");
        assert_eq!(t.duration, 0);
    }

    #[test]
    fn test_into_track_requires_preview() {
        let raw: RawTrack =
            serde_json::from_str(r#"{"id": 1, "title": "x", "preview": ""}"#).unwrap();
        assert!(raw.into_track().is_none());

        let raw: RawTrack = serde_json::from_str(r#"{"id": 1, "title": "x"}"#).unwrap();
        assert!(raw.into_track().is_none());
    }

    #[test]
    fn test_into_track_personal_upload() {
        let raw: RawTrack = serde_json::from_str(
            r#"{"id": -1234567, "title": "Demo", "duration": null, "preview": "https://cdn.example/d.mp3"}"#,
        )
        .unwrap();
        let t = raw.into_track().unwrap();
        assert_eq!(t.id, -1234567);
        assert_eq!(t.duration, 0);
    }

    #[test]
    fn test_label() {
        let t = Track {
            id: 1,
            title: "Bohemian Rhapsody".into(),
            artist: "Queen".into(),
            album: "A Night at the Opera".into(),
            duration: 354,
            preview_url: "u".into(),
        };
        assert_eq!(t.label(), "Bohemian Rhapsody - Queen");
    }
}
