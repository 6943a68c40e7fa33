//! Video-link canonicalization.
//!
//! Diary entries carry links pasted in whatever shape the user's browser
//! produced. Before a link is persisted it is rewritten to the single
//! embeddable form `https://www.youtube.com/embed/VIDEO_ID`; anything the
//! rewriter does not recognize (including links already in embed form) is
//! stored exactly as given.

use url::Url;

/// Canonicalize a video link.
///
/// Total and idempotent: empty input yields an empty string, the two
/// recognized YouTube shapes (`youtu.be/ID` and `youtube.com/watch?v=ID`)
/// yield the embed form, and everything else -- including text that does
/// not parse as a URL -- passes through unchanged. Parse failures degrade
/// to pass-through; this function never errors.
pub fn normalize_video_link(link: &str) -> String {
    if link.is_empty() {
        return String::new();
    }

    // Short share form: the video id is the path after the leading slash,
    // taken verbatim.
    if link.contains("youtu.be/") {
        if let Ok(url) = Url::parse(link) {
            let video_id = url.path().strip_prefix('/').unwrap_or(url.path());
            return format!("https://www.youtube.com/embed/{video_id}");
        }
        return link.to_string();
    }

    // Watch form: the video id is the `v` query parameter. A watch URL
    // without `v` is left alone.
    if link.contains("youtube.com/watch") {
        if let Ok(url) = Url::parse(link) {
            if let Some((_, video_id)) = url.query_pairs().find(|(key, _)| key == "v") {
                return format!("https://www.youtube.com/embed/{video_id}");
            }
        }
        return link.to_string();
    }

    link.to_string()
}
