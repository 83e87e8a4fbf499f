use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::domain::TrackDescriptor;

const MAX_NAME_LENGTH: usize = 100;
const UNKNOWN_ARTIST: &str = "UnknownArtist";
const UNKNOWN_TITLE: &str = "UnknownTitle";

static FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("static regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));
static UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__+").expect("static regex"));

/// Sanitize one part of a file name: forbidden characters and whitespace
/// become `_`, runs of `_` collapse, and the result is capped at 100 chars.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized = FORBIDDEN.replace_all(name, "_");
    let sanitized = WHITESPACE.replace_all(&sanitized, "_");
    let sanitized = UNDERSCORES.replace_all(&sanitized, "_");

    let truncated: String = sanitized
        .trim_matches('_')
        .chars()
        .take(MAX_NAME_LENGTH)
        .collect();

    // A cut can land right after an underscore.
    truncated.trim_end_matches('_').to_string()
}

/// `<artist> - <title>.mp3`, each part sanitized on its own.
pub fn derived_file_name(track: &TrackDescriptor) -> String {
    let artist = sanitized_or(track.artist(), UNKNOWN_ARTIST);
    let title = sanitized_or(track.title(), UNKNOWN_TITLE);
    format!("{} - {}.mp3", artist, title)
}

fn sanitized_or(value: Option<&str>, fallback: &str) -> String {
    let sanitized = sanitize_filename(value.unwrap_or(fallback));
    if sanitized.is_empty() {
        fallback.to_string()
    } else {
        sanitized
    }
}

/// Last path segment of an audio link, without query or fragment.
pub fn link_basename(link: &str) -> Option<String> {
    let segment = match Url::parse(link) {
        Ok(url) => url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_string),
        Err(_) => {
            let path = link.split(['?', '#']).next().unwrap_or_default();
            path.trim_end_matches('/')
                .rsplit('/')
                .next()
                .map(str::to_string)
        }
    }?;

    match segment.as_str() {
        "" | "." | ".." => None,
        _ => Some(segment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AudioSource;

    fn track(title: Option<&str>, artist: Option<&str>) -> TrackDescriptor {
        TrackDescriptor {
            audio: Some(AudioSource {
                link: Some("https://cdn.example/track123.mp3".to_string()),
            }),
            title: title.map(str::to_string),
            artist_name: artist.map(str::to_string),
            artist: None,
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Song: One"), "Song_One");
        assert_eq!(sanitize_filename("A/B"), "A_B");
        assert_eq!(sanitize_filename("  spaced   out  "), "spaced_out");
        assert_eq!(sanitize_filename(r#"a\b:c*d?e"f<g>h|i"#), "a_b_c_d_e_f_g_h_i");
        assert_eq!(sanitize_filename("normal-name"), "normal-name");
    }

    #[test]
    fn test_sanitize_is_idempotent_and_bounded() {
        let inputs = [
            "Song: One".to_string(),
            "__lead and trail__".to_string(),
            format!("{}_{}", "a".repeat(99), "b".repeat(20)),
            "x ".repeat(150),
            "Ünïcödé / Tïtle?".to_string(),
        ];

        for input in &inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "input: {input:?}");
            assert!(once.chars().count() <= 100);
            assert!(!once.contains(['\\', '/', ':', '*', '?', '"', '<', '>', '|']));
        }
    }

    #[test]
    fn test_derived_file_name() {
        assert_eq!(
            derived_file_name(&track(Some("Song: One"), Some("A/B"))),
            "A_B - Song_One.mp3"
        );
        assert_eq!(
            derived_file_name(&track(None, None)),
            "UnknownArtist - UnknownTitle.mp3"
        );
        assert_eq!(
            derived_file_name(&track(Some("???"), Some("Band"))),
            "Band - UnknownTitle.mp3"
        );
    }

    #[test]
    fn test_link_basename() {
        assert_eq!(
            link_basename("https://cdn.example/track123.mp3").as_deref(),
            Some("track123.mp3")
        );
        assert_eq!(
            link_basename("https://cdn.example/a/b/track.mp3?sig=abc#t=10").as_deref(),
            Some("track.mp3")
        );
        assert_eq!(
            link_basename("https://cdn.example/album/").as_deref(),
            Some("album")
        );
        assert_eq!(link_basename("relative/dir/file.ogg?x=1").as_deref(), Some("file.ogg"));
        assert_eq!(link_basename("https://cdn.example/"), None);
        assert_eq!(link_basename("https://cdn.example/.."), None);
    }
}
