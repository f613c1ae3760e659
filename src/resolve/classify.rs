//! Classification of raw user input into a free-text query or a direct
//! catalog reference.
//!
//! Reference detection is a best-effort structural check, not a strict URL
//! parser: any string containing a host-and-path shape (scheme optional)
//! counts as a reference, so short dotted text like "daft.punk" classifies
//! as one. That false-positive surface is accepted behavior.
use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(https?://.)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%_+.~#?&/=]*)")
        .expect("url pattern compiles")
});

/// What the caller asked to search for when the input is free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Album,
    Track,
}

impl SearchMode {
    /// Field prefix inside the search query string, e.g. `album:daft punk`.
    pub fn query_prefix(&self) -> &'static str {
        match self {
            SearchMode::Album => "album",
            SearchMode::Track => "track",
        }
    }

    /// Value for the search endpoint's `type` parameter.
    pub fn search_type(&self) -> &'static str {
        self.query_prefix()
    }
}

/// Catalog resource kind named by a direct reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Album,
    Track,
}

/// Outcome of classifying one raw input string. Every string classifies
/// into exactly one variant; there is no error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedInput {
    Query { text: String, mode: SearchMode },
    Reference { kind: ResourceKind, id: String },
}

/// Classify `raw_input`, preserving `mode` verbatim for free-text queries.
///
/// For references, the kind is Album iff the string contains "album"
/// anywhere, else Track, and the id is the final path segment.
pub fn classify(raw_input: &str, mode: SearchMode) -> ClassifiedInput {
    if URL_PATTERN.is_match(raw_input) {
        let id = raw_input.rsplit('/').next().unwrap_or(raw_input).to_string();
        let kind = if raw_input.contains("album") {
            ResourceKind::Album
        } else {
            ResourceKind::Track
        };
        return ClassifiedInput::Reference { kind, id };
    }

    ClassifiedInput::Query { text: raw_input.to_string(), mode }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_url_classifies_as_album_reference() {
        let input = classify("https://open.spotify.com/album/abc123", SearchMode::Track);
        assert_eq!(
            input,
            ClassifiedInput::Reference { kind: ResourceKind::Album, id: "abc123".to_string() }
        );
    }

    #[test]
    fn track_url_classifies_as_track_reference() {
        let input = classify("https://open.spotify.com/track/xyz789", SearchMode::Album);
        assert_eq!(
            input,
            ClassifiedInput::Reference { kind: ResourceKind::Track, id: "xyz789".to_string() }
        );
    }

    #[test]
    fn schemeless_url_still_classifies_as_reference() {
        let input = classify("open.spotify.com/album/abc123", SearchMode::Album);
        assert_eq!(
            input,
            ClassifiedInput::Reference { kind: ResourceKind::Album, id: "abc123".to_string() }
        );
    }

    #[test]
    fn plain_text_classifies_as_query_with_mode_preserved() {
        let album = classify("daft punk", SearchMode::Album);
        assert_eq!(
            album,
            ClassifiedInput::Query { text: "daft punk".to_string(), mode: SearchMode::Album }
        );

        let track = classify("daft punk", SearchMode::Track);
        assert_eq!(
            track,
            ClassifiedInput::Query { text: "daft punk".to_string(), mode: SearchMode::Track }
        );
    }

    #[test]
    fn dotted_text_is_an_accepted_false_positive() {
        // Documented loose-heuristic surface: host-like text with no path
        // still counts as a reference, with the whole string as its id.
        let input = classify("daft.punk", SearchMode::Album);
        assert_eq!(
            input,
            ClassifiedInput::Reference { kind: ResourceKind::Track, id: "daft.punk".to_string() }
        );
    }

    #[test]
    fn empty_string_classifies_as_query() {
        let input = classify("", SearchMode::Album);
        assert_eq!(
            input,
            ClassifiedInput::Query { text: String::new(), mode: SearchMode::Album }
        );
    }
}
