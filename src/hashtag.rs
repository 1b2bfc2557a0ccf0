//! Hashtag scanning.
//!
//! A hashtag starts at `#` and runs through the following non-whitespace
//! characters, so punctuation stuck to a tag is part of it and a lone `#`
//! is a valid (empty) tag. Line breaks end a tag but not the scan.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::DocumentFormat;
use crate::error::DocumentLoadError;
use crate::extract;

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\S*").expect("Invalid hashtag regex pattern"));

/// All hashtags in `text`, left to right, duplicates kept.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Load, extract, and scan a single document.
pub fn hashtags_from_file(
    path: &Path,
    format: DocumentFormat,
) -> Result<Vec<String>, DocumentLoadError> {
    let text = extract::file_text(path, format)?;
    Ok(extract_hashtags(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_stays_attached() {
        assert_eq!(
            extract_hashtags("Hello #world, this is #test1 and #test2!"),
            vec!["#world,", "#test1", "#test2!"]
        );
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(extract_hashtags("#a #a"), vec!["#a", "#a"]);
    }

    #[test]
    fn empty_and_hashless_text() {
        assert!(extract_hashtags("").is_empty());
        assert!(extract_hashtags("no tags here\nor here").is_empty());
    }

    #[test]
    fn lone_hash_is_a_tag() {
        assert_eq!(extract_hashtags("a # b #"), vec!["#", "#"]);
    }

    #[test]
    fn line_breaks_and_tabs_end_a_tag() {
        assert_eq!(
            extract_hashtags("#one\n#two\t#three\r\n#four"),
            vec!["#one", "#two", "#three", "#four"]
        );
    }

    #[test]
    fn consecutive_hashes_stay_in_one_tag() {
        assert_eq!(extract_hashtags("x##y#z"), vec!["##y#z"]);
    }

    #[test]
    fn unicode_whitespace_and_letters() {
        assert_eq!(
            extract_hashtags("#café\u{00a0}#日本 #ü"),
            vec!["#café", "#日本", "#ü"]
        );
    }

    #[test]
    fn every_tag_starts_with_hash_and_has_no_whitespace() {
        let samples = [
            "mixed #a, #b.c\n\n#d  e#f\t#",
            "#\n#\n",
            "   #x   ",
            "tail#",
        ];
        for text in samples {
            for tag in extract_hashtags(text) {
                assert!(tag.starts_with('#'), "{:?}", tag);
                assert!(!tag.chars().skip(1).any(char::is_whitespace), "{:?}", tag);
            }
        }
    }
}
