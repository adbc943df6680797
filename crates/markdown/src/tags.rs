//! Hashtag extraction.
//!
//! A tag is `#` followed by one or more alphanumeric, `-` or `_` characters.
//! A `#` glued to a word character or to URL punctuation (`/ # & = ? :`) is
//! part of that word or URL and is not a tag. Any other neighbour, such as
//! whitespace, emphasis markers, brackets or a comma, may precede a tag.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Ordered, case-insensitively unique tags, without the leading `#`.
///
/// The casing of the first occurrence is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// Builds a set from tag names, dropping case-insensitive duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = names
            .into_iter()
            .map(Into::into)
            .unique_by(|t: &String| t.to_lowercase())
            .collect();
        Self { tags }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Case-insensitive membership test. A leading `#` is ignored.
    pub fn contains(&self, tag: &str) -> bool {
        let needle = tag.strip_prefix('#').unwrap_or(tag).to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }

    /// The tags as literal `#tag` tokens separated by single spaces.
    pub fn to_canonical_line(&self) -> String {
        self.tags.iter().map(|t| format!("#{}", t)).join(" ")
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// Extracts the ordered, de-duplicated tag set from card text. Never fails.
pub fn extract_tags(raw: &str) -> TagSet {
    TagSet::from_names(tag_spans(raw).into_iter().map(|span| &raw[span.start + 1..span.end]))
}

/// Byte ranges of every tag token in `raw`, each including its `#`.
pub fn tag_spans(raw: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut previous: Option<char> = None;
    let mut chars = raw.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c == '#' && may_precede_tag(previous) {
            let mut end = start + 1;
            while let Some(&(idx, next)) = chars.peek() {
                if !is_tag_char(next) {
                    break;
                }
                end = idx + next.len_utf8();
                previous = Some(next);
                chars.next();
            }
            if end > start + 1 {
                spans.push(start..end);
                continue;
            }
        }
        previous = Some(c);
    }
    spans
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn may_precede_tag(previous: Option<char>) -> bool {
    match previous {
        None => true,
        Some(c) => !(is_tag_char(c) || matches!(c, '/' | '#' | '&' | '=' | '?' | ':')),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &str) -> Vec<String> {
        extract_tags(raw).as_slice().to_vec()
    }

    #[test]
    fn scenario_tags_in_order() {
        assert_eq!(
            names("**Caveman syndrome**: humans prefer *physical* texture. #psychology #evolution"),
            ["psychology", "evolution"]
        );
    }

    #[test]
    fn duplicates_keep_first_casing() {
        assert_eq!(names("#Rust #rust #RUST #go"), ["Rust", "go"]);
    }

    #[test]
    fn hash_inside_words_and_urls_is_not_a_tag() {
        assert!(names("C# and issue#12").is_empty());
        assert!(names("see https://example.com/page#section").is_empty());
        assert!(names("## heading and # title").is_empty());
        assert!(names("https://example.com/?q=1&#frag and x=#y").is_empty());
        assert_eq!(names("(#wrapped) \"#quoted\""), ["wrapped", "quoted"]);
    }

    #[test]
    fn tags_next_to_markup_and_punctuation() {
        assert_eq!(names("**#important** idea"), ["important"]);
        assert_eq!(names("#alpha,#beta and x*#gamma"), ["alpha", "beta", "gamma"]);
        assert_eq!(names("*#em* and ;#semi"), ["em", "semi"]);
        assert!(names("snake_#case").is_empty());
    }

    #[test]
    fn tag_stops_at_punctuation() {
        assert_eq!(names("ends here #idea."), ["idea"]);
        assert_eq!(names("#multi-word_tag, #über"), ["multi-word_tag", "über"]);
    }

    #[test]
    fn spans_cover_the_hash() {
        let raw = "a #b c#d #e";
        let spans = tag_spans(raw);
        let tokens: Vec<&str> = spans.iter().map(|s| &raw[s.clone()]).collect();
        assert_eq!(tokens, ["#b", "#e"]);
    }

    #[test]
    fn extraction_is_idempotent_over_canonical_form() {
        let raw = "Notes on #Memory and #sleep, again #memory";
        let tags = extract_tags(raw);
        let reinserted = format!("{}\n\n{}", raw, tags.to_canonical_line());
        assert_eq!(extract_tags(&reinserted), tags);
        assert_eq!(extract_tags(&tags.to_canonical_line()), tags);
    }

    #[test]
    fn contains_ignores_case_and_hash() {
        let tags = extract_tags("#Psychology");
        assert!(tags.contains("psychology"));
        assert!(tags.contains("#PSYCHOLOGY"));
        assert!(!tags.contains("evolution"));
    }
}
