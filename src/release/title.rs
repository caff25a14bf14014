//! Release title cleanup
//!
//! Strips bracketed tags, addon/uploader names and technical tokens from a
//! raw release title to recover a short movie-name fragment.

use once_cell::sync::Lazy;
use regex::Regex;

use super::extract::extract_year;
use super::DEFAULT_TITLE;

/// Maximum number of words kept from the cleaned title
pub const MAX_TITLE_WORDS: usize = 3;

static BRACKETS_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").ok());

static UPLOADER_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:jackettio|elfhosted|torrentio|souhail\s+pro|comet|mediafusion)\b").ok()
});

static SEPARATOR_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[._]+").ok());

// A single word that is a technical token, optionally carrying a release
// group suffix such as `x265-GTM`
static TECH_WORD_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"(?ix)^(?:
            \d{3,4}p | [48]k | uhd | fhd | sdr | hdr | hdr10\+? | hdr10plus | dv | dovi
            | [xh]26[45] | hevc | avc | av1
            | web | web-?dl | web-?rip | blu-?ray | bdrip | brrip | remux | hdtv | dvd-?rip
            | dts(?:-hd)? | truehd | atmos | aac\d* | e?ac-?3 | ddp?\+?\d* | flac
            | \d+-?bit | vbr | cbr | amzn | mzn | nf | hmax | dsnp
            | proper | repack | gb | mb
        )(?:-\w+)?$",
    )
    .ok()
});

/// Remove bracketed tags and addon names, turn separator dots into spaces,
/// collapse whitespace. Only the first line of a multi-line title is kept.
pub fn normalize_title(title: &str) -> String {
    let first_line = title
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");

    let mut text = first_line.to_string();
    for re in [&*BRACKETS_RE, &*UPLOADER_RE, &*SEPARATOR_RE]
        .into_iter()
        .flatten()
    {
        text = re.replace_all(&text, " ").into_owned();
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_tech_word(word: &str) -> bool {
    TECH_WORD_RE
        .as_ref()
        .map(|re| re.is_match(word))
        .unwrap_or(false)
}

fn is_year_word(word: &str) -> bool {
    word.len() == 4 && extract_year(word).is_some()
}

fn is_noise(word: &str) -> bool {
    is_tech_word(word) || is_year_word(word)
}

/// Short movie-name fragment with the year appended when present.
///
/// Leading noise (such as a `(4K)` tag) is skipped, then words are taken up
/// to the first year or technical token. Words of two characters or fewer
/// are dropped and at most [`MAX_TITLE_WORDS`] are kept.
pub fn clean_title(raw: &str) -> String {
    let normalized = normalize_title(raw);
    let words: Vec<&str> = normalized
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-'))
        .map(|w| w.trim_matches('-'))
        .filter(|w| !w.is_empty())
        .collect();

    let mut name: Vec<&str> = words
        .iter()
        .copied()
        .skip_while(|w| is_noise(w))
        .take_while(|w| !is_noise(w))
        .filter(|w| w.chars().count() > 2)
        .take(MAX_TITLE_WORDS)
        .collect();

    if name.is_empty() {
        name = words
            .iter()
            .copied()
            .filter(|w| !is_noise(w))
            .filter(|w| w.chars().count() > 2)
            .take(MAX_TITLE_WORDS)
            .collect();
    }

    let movie_part = if name.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        name.join(" ")
    };

    match extract_year(raw) {
        Some(year) => format!("{} ({})", movie_part, year),
        None => movie_part,
    }
}
