use crate::deezer::models::Track;

pub const WRONG_GUESS_NOTICE: &str = "Wrong answer, keep trying.";

/// `m:ss` from whole seconds.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Hint lines unlocked by the time the player is on `attempt` (1-based).
/// Each tier adds to the previous ones.
pub fn hint_lines(track: &Track, attempt: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if attempt >= 2 {
        lines.push(WRONG_GUESS_NOTICE.to_string());
    }
    if attempt >= 3 {
        lines.push(format!("Duration: {}", format_duration(track.duration)));
    }
    if attempt >= 4 {
        lines.push(format!("Album: {}", track.album));
    }
    if attempt >= 5 {
        lines.push(format!("Artist: {}", track.artist));
    }
    lines
}

/// Every track as "title - artist", in playlist order.
pub fn autocomplete(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(Track::label).collect()
}
