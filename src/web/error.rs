use crate::game::GameError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Body of every failed API call.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

/// HTTP face of [`GameError`].
#[derive(Debug)]
pub struct ApiError(pub GameError);

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            GameError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            GameError::EmptyPlaylist { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            GameError::NoActiveRound => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::info!(code = self.0.code(), status = status.as_u16(), "request rejected: {}", self.0);
        let body = ErrorBody {
            error: self.0.to_string(),
            code: self.0.code(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses_are_distinct() {
        let errors = [
            ApiError(GameError::InvalidIdentifier { input: "x".into() }),
            ApiError(GameError::EmptyPlaylist {
                playlist_id: "1".into(),
            }),
            ApiError(GameError::NoActiveRound),
        ];
        let mut statuses: Vec<u16> = errors.iter().map(|e| e.status().as_u16()).collect();
        statuses.sort_unstable();
        statuses.dedup();
        assert_eq!(statuses.len(), 3);
    }
}
