use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::EMBED_URL_PREFIX;

lazy_static! {
    // watch?v=<id>, youtu.be/<id>, /embed/<id>, /v/<id>, /e/<id>, /<segment>/<...>/<id>
    static ref YOUTUBE_LINK: Regex = Regex::new(
        r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([a-zA-Z0-9_-]{11})"
    )
    .unwrap();
}

/// Rewrites a YouTube share link into its embeddable form
///
/// Returns an empty string for empty input and the input itself when it is
/// not a recognized YouTube link.
pub fn to_embed_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    match YOUTUBE_LINK.captures(url) {
        Some(cap) => format!("{}{}", EMBED_URL_PREFIX, &cap[1]),
        None => url.to_owned(),
    }
}
