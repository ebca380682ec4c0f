use crate::deezer::models::Track;
use crate::game::normalize::normalize;

/// Normalized answers accepted for `track`: the title alone, or title and
/// artist in either order, with or without a `" - "` separator.
pub fn accepted_answers(track: &Track) -> [String; 5] {
    let title = normalize(&track.title);
    let artist = normalize(&track.artist);
    [
        format!("{title} - {artist}"),
        format!("{title} {artist}"),
        format!("{artist} - {title}"),
        format!("{artist} {title}"),
        title,
    ]
}

/// Exact match of the normalized guess against [`accepted_answers`].
pub fn is_correct(track: &Track, guess: &str) -> bool {
    let guess = normalize(guess);
    accepted_answers(track).iter().any(|a| *a == guess)
}
