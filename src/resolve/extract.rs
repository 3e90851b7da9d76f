//! Video reference normalization.
//!
//! Turns whatever the user pasted (watch URL, short link, embed/shorts/legacy
//! path, or a bare token) into a [`VideoId`]. Rules are tried in order and the
//! first one yielding a well-formed token wins.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::types::VideoId;

/// Ordered URL recognition rules. Each captures the 11 characters after its
/// marker that are not a quote, `&`, `?`, `/` or whitespace.
static URL_RULES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (
            "watch",
            r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
        ),
        ("short_link", r#"youtu\.be/([^"&?/\s]{11})"#),
        ("embed", r#"youtube\.com/embed/([^"&?/\s]{11})"#),
        ("shorts", r#"youtube\.com/shorts/([^"&?/\s]{11})"#),
        ("legacy_v", r#"youtube\.com/v/([^"&?/\s]{11})"#),
    ]
    .into_iter()
    .map(|(name, pattern)| {
        (
            name,
            Regex::new(pattern).expect("URL rule pattern must compile"),
        )
    })
    .collect()
});

/// Extract the canonical identifier from a raw reference.
///
/// Returns `None` when no rule matches; callers treat that as a client input
/// error rather than a transient failure.
pub fn extract(reference: &str) -> Option<VideoId> {
    for (rule, regex) in URL_RULES.iter() {
        let Some(captures) = regex.captures(reference) else {
            continue;
        };

        // A capture outside the canonical alphabet does not count as a match
        if let Some(id) = captures.get(1).and_then(|m| VideoId::parse(m.as_str())) {
            debug!(rule, video_id = %id, "Extracted video id");
            return Some(id);
        }
    }

    let id = VideoId::parse(reference.trim());
    if let Some(ref id) = id {
        debug!(rule = "bare", video_id = %id, "Extracted video id");
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    fn extracted(reference: &str) -> Option<String> {
        extract(reference).map(|id| id.as_str().to_string())
    }

    #[test]
    fn test_watch_query_parameter() {
        assert_eq!(extracted(&format!("https://www.youtube.com/watch?v={ID}")), Some(ID.into()));
        assert_eq!(
            extracted(&format!("https://youtube.com/watch?feature=share&v={ID}&t=42s")),
            Some(ID.into())
        );
        assert_eq!(extracted(&format!("m.youtube.com/watch?v={ID}")), Some(ID.into()));
    }

    #[test]
    fn test_short_link() {
        assert_eq!(extracted(&format!("https://youtu.be/{ID}")), Some(ID.into()));
        assert_eq!(extracted(&format!("youtu.be/{ID}?si=tracking123")), Some(ID.into()));
    }

    #[test]
    fn test_embed_and_e_paths() {
        assert_eq!(extracted(&format!("https://www.youtube.com/embed/{ID}")), Some(ID.into()));
        assert_eq!(extracted(&format!("https://www.youtube.com/e/{ID}")), Some(ID.into()));
    }

    #[test]
    fn test_shorts_path() {
        assert_eq!(extracted(&format!("https://www.youtube.com/shorts/{ID}")), Some(ID.into()));
        assert_eq!(
            extracted(&format!("https://youtube.com/shorts/{ID}?feature=share")),
            Some(ID.into())
        );
    }

    #[test]
    fn test_legacy_v_path() {
        assert_eq!(extracted(&format!("http://www.youtube.com/v/{ID}?version=3")), Some(ID.into()));
    }

    #[test]
    fn test_bare_identifier() {
        assert_eq!(extracted(ID), Some(ID.into()));
        assert_eq!(extracted(&format!("  {ID}\n")), Some(ID.into()));
        assert_eq!(extracted("a-b_c-d_e-f"), Some("a-b_c-d_e-f".into()));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(extracted("not a url"), None);
        assert_eq!(extracted(""), None);
        assert_eq!(extracted("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(extracted("dQw4w9WgXcQQ"), None);
    }

    #[test]
    fn test_capture_outside_alphabet_is_rejected() {
        assert_eq!(extracted("https://youtu.be/abc.def.ghi"), None);
    }

    #[test]
    fn test_nested_path_prefix() {
        assert_eq!(
            extracted(&format!("https://www.youtube.com/user/RickAstleyVEVO#p/a/u/1/{ID}")),
            Some(ID.into())
        );
        assert_eq!(
            extracted(&format!("http://youtube.com/attribution_link/x/{ID}")),
            Some(ID.into())
        );
    }

    #[test]
    fn test_rejected_watch_capture_falls_through_to_later_rules() {
        // The watch rule captures "bad!id.xyz1" from `v=`, the shorts rule finds the id
        assert_eq!(
            extracted(&format!("https://www.youtube.com/shorts/{ID}?v=bad!id.xyz1")),
            Some(ID.into())
        );
    }

    #[test]
    fn test_every_shape_yields_the_embedded_token() {
        for id in ["dQw4w9WgXcQ", "_-_-_-_-_-_", "AAAAAAAAAAA", "9bZkp7q19f0"] {
            let shapes = [
                format!("https://www.youtube.com/watch?v={id}"),
                format!("https://youtu.be/{id}"),
                format!("https://www.youtube.com/embed/{id}"),
                format!("https://www.youtube.com/shorts/{id}"),
                format!("https://www.youtube.com/v/{id}"),
                id.to_string(),
            ];

            for shape in shapes {
                assert_eq!(extracted(&shape).as_deref(), Some(id), "shape: {shape}");
            }
        }
    }
}
