use once_cell::sync::Lazy;
use regex::Regex;

static PLAYLIST_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"playlist/(\d+)").expect("static regex"));

/// Pull a playlist id out of free text: either a share URL containing
/// `playlist/<digits>` or a bare numeric id.
pub fn extract_id(text: &str) -> Option<String> {
    if let Some(caps) = PLAYLIST_PATH.captures(text) {
        return Some(caps[1].to_string());
    }
    let text = text.trim();
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        return Some(text.to_string());
    }
    None
}
