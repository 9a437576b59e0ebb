// crates/streampeek-core/src/embed.rs
//
// Embed and channel-page URL templates. Deterministic string building only —
// nothing here performs I/O or touches panel state.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::links::ChannelId;

/// Escape set for query values: everything but ASCII alphanumerics and the
/// unreserved marks ``- _ . ! ~ * ' ( )`` (the encodeURIComponent set), so a
/// dotted hostname reads back as written.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Player embed URL with muted autoplay. `parent_host` is the hostname that
/// hosts the embed (the player refuses to load without a parent parameter).
pub fn build_embed_url(channel: &ChannelId, parent_host: &str) -> String {
    let ch = utf8_percent_encode(channel.as_str(), QUERY_VALUE);
    let parent = utf8_percent_encode(parent_host, QUERY_VALUE);
    format!("https://player.twitch.tv/?channel={ch}&parent={parent}&muted=true&autoplay=true")
}

/// Canonical channel page, used by the open-in-browser header button.
pub fn channel_page_url(channel: &ChannelId) -> String {
    format!("https://www.twitch.tv/{channel}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chan(s: &str) -> ChannelId {
        ChannelId::new(s).unwrap()
    }

    #[test]
    fn embed_url_matches_template() {
        assert_eq!(
            build_embed_url(&chan("somechannel"), "localhost"),
            "https://player.twitch.tv/?channel=somechannel&parent=localhost&muted=true&autoplay=true"
        );
    }

    #[test]
    fn dotted_parent_host_passes_through_unescaped() {
        let url = build_embed_url(&chan("ab"), "my.host.example");
        assert!(url.contains("parent=my.host.example"));
    }

    #[test]
    fn reserved_characters_are_still_escaped() {
        let url = build_embed_url(&chan("ab"), "host:8080/path");
        assert!(url.contains("parent=host%3A8080%2Fpath"));
    }

    #[test]
    fn channel_page_is_canonical() {
        assert_eq!(
            channel_page_url(&chan("CohhCarnage")),
            "https://www.twitch.tv/CohhCarnage"
        );
    }
}
