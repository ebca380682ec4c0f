//! Terminal front end: the same game, driven from stdin.

use crate::config::Config;
use crate::game::catalog;
use crate::game::session::RoundOutcome;
use crate::game::{load_playlist, PlayedEntry, RoundSession, TrackSource};
use anyhow::Context;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

pub async fn run(cfg: &Config, source: &dyn TrackSource, input: Option<&str>) -> anyhow::Result<()> {
    let loaded = load_playlist(source, input, &cfg.game.default_playlist_id).await?;
    let name = catalog::display_name(&cfg.playlists, &loaded.playlist_id, None);

    let mut session = RoundSession::new(cfg.game.max_attempts);
    session.start(loaded.playlist_id, loaded.tracks, &mut rand::rng())?;

    let mut out = std::io::stdout();
    writeln!(out, "Playing {name}. Type a guess, :history or :quit.")?;
    show_hint(&session, &mut out)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("read stdin")? {
        if handle_line(&mut session, &line, &mut out)? == Step::Quit {
            break;
        }
    }

    write_summary(session.history(), &mut out)?;
    Ok(())
}

fn show_hint(session: &RoundSession, out: &mut impl Write) -> anyhow::Result<()> {
    let hint = session.hint(session.attempts().len() + 1)?;
    writeln!(out)?;
    writeln!(out, "Preview: {}", hint.preview_url)?;
    for line in &hint.hint_lines {
        writeln!(out, "  * {line}")?;
    }
    write!(out, "guess ({} left)> ", session.remaining_attempts())?;
    out.flush()?;
    Ok(())
}

fn handle_line(session: &mut RoundSession, line: &str, out: &mut impl Write) -> anyhow::Result<Step> {
    match line.trim() {
        ":q" | ":quit" => return Ok(Step::Quit),
        ":h" | ":history" => write_history(session.history(), out)?,
        "" => {}
        guess => {
            let result = session.submit_guess(guess, &mut rand::rng())?;
            match (result.round_outcome, result.revealed_answer) {
                (Some(RoundOutcome::Won), Some(answer)) => writeln!(out, "Correct! {answer}")?,
                (_, Some(answer)) => writeln!(out, "Out of attempts. It was: {answer}")?,
                _ => writeln!(out, "Wrong.")?,
            }
        }
    }
    show_hint(session, out)?;
    Ok(Step::Continue)
}

fn write_history(history: &[PlayedEntry], out: &mut impl Write) -> std::io::Result<()> {
    for (i, e) in history.iter().enumerate() {
        let mark = if e.was_correct { "+" } else { "-" };
        writeln!(out, "{:02}. [{mark}] {} - {}", i + 1, e.title, e.artist)?;
    }
    Ok(())
}

fn write_summary(history: &[PlayedEntry], out: &mut impl Write) -> std::io::Result<()> {
    let won = history.iter().filter(|e| e.was_correct).count();
    writeln!(out)?;
    writeln!(out, "Guessed {won} of {} songs.", history.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::source::testing::track;

    fn session() -> RoundSession {
        let mut s = RoundSession::new(2);
        s.start("1", vec![track(1, "Creep", "Radiohead")], &mut rand::rng())
            .unwrap();
        s
    }

    fn feed(s: &mut RoundSession, line: &str) -> (Step, String) {
        let mut buf = Vec::new();
        let step = handle_line(s, line, &mut buf).unwrap();
        (step, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_correct_guess() {
        let mut s = session();
        let (step, out) = feed(&mut s, "creep");
        assert_eq!(step, Step::Continue);
        assert!(out.starts_with("Correct! Creep - Radiohead"));
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_wrong_guesses_then_reveal() {
        let mut s = session();
        let (_, out) = feed(&mut s, "karma police");
        assert!(out.starts_with("Wrong."));
        assert!(out.contains("* Wrong answer, keep trying."));
        assert!(out.contains("(1 left)"));

        let (_, out) = feed(&mut s, "paranoid android");
        assert!(out.starts_with("Out of attempts. It was: Creep - Radiohead"));
        assert!(out.contains("(2 left)"));
    }

    #[test]
    fn test_commands() {
        let mut s = session();
        feed(&mut s, "creep");
        let (_, out) = feed(&mut s, ":history");
        assert!(out.starts_with("01. [+] Creep - Radiohead"));
        assert_eq!(s.history().len(), 1);

        let (step, out) = feed(&mut s, "   ");
        assert_eq!(step, Step::Continue);
        assert!(out.contains("Preview: https://cdn.example/1.mp3"));

        assert_eq!(feed(&mut s, ":quit").0, Step::Quit);
    }

    #[test]
    fn test_summary() {
        let history = vec![
            PlayedEntry {
                title: "a".into(),
                artist: "b".into(),
                was_correct: true,
            },
            PlayedEntry {
                title: "c".into(),
                artist: "d".into(),
                was_correct: false,
            },
        ];
        let mut buf = Vec::new();
        write_summary(&history, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\nGuessed 1 of 2 songs.\n");
    }
}
