//! Round session state machine
//!
//! One [`RoundSession`] per player. It starts idle, becomes active on
//! [`RoundSession::start`], then loops over the playlist in shuffled order:
//! every round ends either on a correct guess or once `max_attempts` guesses
//! have been made, and the next track comes up immediately. When the shuffled
//! order runs out a fresh one is drawn. [`RoundSession::reset`] returns the
//! session to idle.
//!
//! The session owns the tracks fetched at start, so hints and guesses never
//! go back to the catalog.

use crate::deezer::models::Track;
use crate::game::error::GameError;
use crate::game::evaluate::is_correct;
use crate::game::hints;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// One guess within the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub guess: String,
    pub was_correct: bool,
}

/// A finished round, kept for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayedEntry {
    pub title: String,
    pub artist: String,
    pub was_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Won,
    Lost,
}

/// Result of [`RoundSession::submit_guess`].
#[derive(Debug, Clone, Serialize)]
pub struct GuessOutcome {
    pub is_correct: bool,
    /// "title - artist", only when this guess closed the round.
    pub revealed_answer: Option<String>,
    /// Only when this guess closed the round.
    pub round_outcome: Option<RoundOutcome>,
    pub remaining_attempts: usize,
    /// Attempts of the round this guess belonged to.
    pub attempts: Vec<Attempt>,
    pub history: Vec<PlayedEntry>,
    pub preview_url: String,
}

/// Result of [`RoundSession::hint`].
#[derive(Debug, Clone, Serialize)]
pub struct Hint {
    pub preview_url: String,
    pub hint_lines: Vec<String>,
    pub autocomplete: Vec<String>,
}

#[derive(Debug, Clone)]
struct ActiveRound {
    playlist_id: String,
    tracks: Vec<Track>,
    order: Vec<usize>,
    cursor: usize,
    attempts: Vec<Attempt>,
    history: Vec<PlayedEntry>,
}

impl ActiveRound {
    fn current(&self) -> Option<&Track> {
        self.order.get(self.cursor).and_then(|&i| self.tracks.get(i))
    }

    /// Step to the next track, drawing a new order once this one is used up.
    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cursor += 1;
        if self.cursor >= self.order.len() {
            self.order = shuffled_order(self.tracks.len(), rng);
            self.cursor = 0;
            tracing::debug!(playlist_id = %self.playlist_id, "playlist exhausted, reshuffled");
        }
    }
}

fn shuffled_order<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}

#[derive(Debug, Clone)]
pub struct RoundSession {
    max_attempts: usize,
    active: Option<ActiveRound>,
}

impl Default for RoundSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl RoundSession {
    /// Idle session. `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[cfg(test)]
    pub(crate) fn playlist_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.playlist_id.as_str())
    }

    /// Track the player is currently guessing.
    #[cfg(test)]
    pub(crate) fn current_track(&self) -> Option<&Track> {
        self.active.as_ref().and_then(ActiveRound::current)
    }

    pub fn attempts(&self) -> &[Attempt] {
        self.active.as_ref().map(|a| a.attempts.as_slice()).unwrap_or(&[])
    }

    pub fn remaining_attempts(&self) -> usize {
        self.max_attempts.saturating_sub(self.attempts().len())
    }

    /// Rounds finished since the last start; empty when idle.
    pub fn history(&self) -> &[PlayedEntry] {
        self.active.as_ref().map(|a| a.history.as_slice()).unwrap_or(&[])
    }

    /// Begin a new game on `tracks`, discarding any previous progress.
    /// On error the session is left as it was.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        playlist_id: impl Into<String>,
        tracks: Vec<Track>,
        rng: &mut R,
    ) -> Result<(), GameError> {
        let playlist_id = playlist_id.into();
        if tracks.is_empty() {
            return Err(GameError::EmptyPlaylist { playlist_id });
        }

        tracing::info!(playlist_id = %playlist_id, tracks = tracks.len(), "game started");
        self.active = Some(ActiveRound {
            playlist_id,
            order: shuffled_order(tracks.len(), rng),
            tracks,
            cursor: 0,
            attempts: Vec::new(),
            history: Vec::new(),
        });
        Ok(())
    }

    /// Score `guess` against the current track.
    pub fn submit_guess<R: Rng + ?Sized>(
        &mut self,
        guess: &str,
        rng: &mut R,
    ) -> Result<GuessOutcome, GameError> {
        let max_attempts = self.max_attempts;
        let round = self.active.as_mut().ok_or(GameError::NoActiveRound)?;
        let track = round.current().cloned().ok_or(GameError::NoActiveRound)?;

        let guess = guess.trim();
        let correct = is_correct(&track, guess);
        round.attempts.push(Attempt {
            guess: guess.to_string(),
            was_correct: correct,
        });

        let remaining_attempts = max_attempts.saturating_sub(round.attempts.len());
        let closed = correct || round.attempts.len() >= max_attempts;
        tracing::debug!(correct, attempt = round.attempts.len(), closed, "guess scored");

        if !closed {
            return Ok(GuessOutcome {
                is_correct: false,
                revealed_answer: None,
                round_outcome: None,
                remaining_attempts,
                attempts: round.attempts.clone(),
                history: round.history.clone(),
                preview_url: track.preview_url,
            });
        }

        round.history.push(PlayedEntry {
            title: track.title.clone(),
            artist: track.artist.clone(),
            was_correct: correct,
        });
        round.advance(rng);
        let attempts = std::mem::take(&mut round.attempts);

        Ok(GuessOutcome {
            is_correct: correct,
            revealed_answer: Some(track.label()),
            round_outcome: Some(if correct {
                RoundOutcome::Won
            } else {
                RoundOutcome::Lost
            }),
            remaining_attempts,
            attempts,
            history: round.history.clone(),
            preview_url: track.preview_url,
        })
    }

    /// Clues for the current track as of `attempt` (caller-supplied, not
    /// checked against the attempt log).
    pub fn hint(&self, attempt: usize) -> Result<Hint, GameError> {
        let round = self.active.as_ref().ok_or(GameError::NoActiveRound)?;
        let track = round.current().ok_or(GameError::NoActiveRound)?;
        Ok(Hint {
            preview_url: track.preview_url.clone(),
            hint_lines: hints::hint_lines(track, attempt),
            autocomplete: hints::autocomplete(&round.tracks),
        })
    }

    /// Drop everything; the session is idle again.
    pub fn reset(&mut self) {
        self.active = None;
    }

    #[cfg(test)]
    pub(crate) fn order(&self) -> &[usize] {
        self.active.as_ref().map(|a| a.order.as_slice()).unwrap_or(&[])
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.cursor)
    }
}
