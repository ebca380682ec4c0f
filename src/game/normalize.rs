//! Answer normalization
//!
//! Guesses and track metadata are compared after folding case, accents and
//! punctuation so that `"QUEEN - bohemian rhapsody!"` matches
//! `"Bohemian Rhapsody"` by `"Queen"`.

use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Characters that separate words; each becomes a single space.
const SEPARATORS: &[char] = &[',', ';', '(', ')', '!', '?', '¡', '¿', '"', '\'', '-'];

/// Fold `text` into its comparison form.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());

    for c in lowered.trim().nfd() {
        // Only nonspacing marks; spacing vowel signs (Mc) are letters here.
        if c.general_category() == GeneralCategory::NonspacingMark {
            continue;
        }
        match c {
            // Abbreviation dots vanish: "S.A." -> "sa".
            '.' => {}
            '&' => out.push('y'),
            c if SEPARATORS.contains(&c) => out.push(' '),
            c => out.push(c),
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(normalize("  Bohemian   RHAPSODY \t"), "bohemian rhapsody");
    }

    #[test]
    fn test_accents() {
        assert_eq!(normalize("Canción Ñandú"), "cancion nandu");
        assert_eq!(normalize("Beyoncé"), "beyonce");
    }

    #[test]
    fn test_spacing_marks_survive() {
        assert_eq!(normalize("रामा"), "रामा");
        assert_eq!(normalize("Ñ\u{20DD}"), "n\u{20DD}");
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(normalize("¿Dónde Estás, Corazón?"), "donde estas corazon");
        assert_eq!(normalize("Don't Stop Me Now"), "don t stop me now");
        assert_eq!(normalize("Hey Jude (Remastered 2015)"), "hey jude remastered 2015");
        assert_eq!(normalize("Smells Like Teen Spirit - Live"), "smells like teen spirit live");
    }

    #[test]
    fn test_ampersand_becomes_y() {
        assert_eq!(normalize("Simon & Garfunkel"), "simon y garfunkel");
    }

    #[test]
    fn test_abbreviations() {
        assert_eq!(normalize("Ñandú, S.A.!"), normalize("nandu sa"));
        assert_eq!(normalize("R.E.M."), "rem");
    }

    #[test]
    fn test_idempotent() {
        for s in [
            "Ñandú, S.A.!",
            "  ¡Ay, Qué   Noche & Día! ",
            "Mr. Brightside",
            "\"Heroes\" - 2017 Remaster",
            "",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" ?!- "), "");
    }
}
