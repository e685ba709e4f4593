//! Search layer: case-insensitive substring matching over a record collection.
//!
//! Matching is a single linear scan in collection order; there is no ranking.
//! [`highlight_ranges`] locates every occurrence of the query inside a label
//! so the UI can style the matched text.

use crate::types::Record;
use serde::Deserialize;
use std::ops::Range;

/// What a query is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTarget {
    /// The record's precomputed search blob (every attribute value).
    #[default]
    Blob,
    /// Only the label the field will display.
    Label,
}

// ---------------------------------------------------------------------------
// Label formatting
// ---------------------------------------------------------------------------

/// Separator placed between the parts of a formatted label.
pub const LABEL_SEPARATOR: &str = " - ";

/// Ordered list of detail keys whose values make up a record's label.
///
/// Empty and missing values are skipped, so a malformed record still gets a
/// best-effort label instead of an error. With no keys, or when every part
/// is empty, the label is the record's display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LabelTemplate {
    keys: Vec<String>,
}

impl LabelTemplate {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn format(&self, record: &Record) -> String {
        let label = self
            .keys
            .iter()
            .map(|k| record.detail(k).trim())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(LABEL_SEPARATOR);

        if label.is_empty() {
            record.display_name().to_string()
        } else {
            label
        }
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Indices of every record whose searchable text contains `query`,
/// ignoring case, in collection order.
///
/// `label_of` is only consulted for [`MatchTarget::Label`]. An empty query
/// matches nothing; callers decide separately whether a query is long
/// enough to search at all.
pub fn find_matches<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    query: &str,
    target: MatchTarget,
    label_of: impl Fn(&Record) -> String,
) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    records
        .into_iter()
        .enumerate()
        .filter(|(_, record)| match target {
            MatchTarget::Blob => record.search_blob().contains(&needle),
            MatchTarget::Label => label_of(record).to_lowercase().contains(&needle),
        })
        .map(|(i, _)| i)
        .collect()
}

/// Byte ranges of every case-insensitive, non-overlapping occurrence of
/// `query` in `text`, scanning left to right.
///
/// Ranges always fall on char boundaries of `text`, so they can be used to
/// slice it directly even when lowercasing changes byte lengths.
pub fn highlight_ranges(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut next_free = 0;
    for (start, _) in text.char_indices() {
        if start < next_free {
            continue;
        }
        if let Some(end) = match_end(text, start, &needle) {
            ranges.push(start..end);
            next_free = end;
        }
    }
    ranges
}

/// End offset of a match of `needle` beginning at byte `start`, if any.
fn match_end(text: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in text[start..].char_indices() {
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(start + offset + ch.len_utf8());
        }
    }
    None
}

/// Split `text` into `(segment, is_match)` pieces according to `ranges`.
///
/// Ranges must be sorted and non-overlapping, as [`highlight_ranges`]
/// returns them. Out-of-bounds ranges are ignored.
pub fn split_highlighted<'t>(text: &'t str, ranges: &[Range<usize>]) -> Vec<(&'t str, bool)> {
    let mut parts = Vec::new();
    let mut cursor = 0;
    for range in ranges {
        if range.start < cursor
            || range.end > text.len()
            || !text.is_char_boundary(range.start)
            || !text.is_char_boundary(range.end)
        {
            continue;
        }
        if range.start > cursor {
            parts.push((&text[cursor..range.start], false));
        }
        parts.push((&text[range.clone()], true));
        cursor = range.end;
    }
    if cursor < text.len() {
        parts.push((&text[cursor..], false));
    }
    parts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn room(code: &str, name: &str) -> Record {
        Record::new(name, [("Code", code), ("Room", name)])
    }

    #[test]
    fn label_template_joins_non_empty_parts() {
        let t = LabelTemplate::new(["Code", "Room"]);
        assert_eq!(
            t.format(&room("RCB00025", "Phlebotomy Waiting Room")),
            "RCB00025 - Phlebotomy Waiting Room"
        );
        assert_eq!(t.format(&room("", "Store")), "Store");
    }

    #[test]
    fn label_template_falls_back_to_display_name() {
        let r = Record::new("Electrical", [("Trade", "")]);
        assert_eq!(LabelTemplate::new(["Trade"]).format(&r), "Electrical");
        assert_eq!(LabelTemplate::default().format(&r), "Electrical");
    }

    #[test]
    fn blob_matching_keeps_collection_order() {
        let records = [
            room("RCB00025", "Phlebotomy Waiting Room"),
            room("RCB00027", "Phelobotomy"),
            room("RCB00028", "Clinic Room 2"),
        ];
        let hits = find_matches(&records, "PH", MatchTarget::Blob, |r| r.display_name().into());
        assert_eq!(hits, [0, 1]);
        // "Phelobotomy" does not contain "phle".
        let hits = find_matches(&records, "PHLE", MatchTarget::Blob, |r| r.display_name().into());
        assert_eq!(hits, [0]);
    }

    #[test]
    fn label_matching_ignores_other_attributes() {
        let records = [Record::new("Store", [("Building", "RUG-ESTATES")])];
        let label = LabelTemplate::new(["Code"]);
        assert!(find_matches(&records, "estates", MatchTarget::Label, |r| label.format(r)).is_empty());
        assert_eq!(find_matches(&records, "estates", MatchTarget::Blob, |r| label.format(r)), [0]);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let records = [room("RCB00030", "Store")];
        assert!(find_matches(&records, "", MatchTarget::Blob, |r| r.display_name().into()).is_empty());
    }

    #[rstest]
    #[case("RCB00025 - Phlebotomy Waiting Room", "phle", vec![11..15])]
    #[case("Store Room store", "STORE", vec![0..5, 11..16])]
    #[case("aaaa", "aa", vec![0..2, 2..4])]
    #[case("Clinic", "xyz", vec![])]
    #[case("Clinic", "", vec![])]
    fn highlight_ranges_cases(
        #[case] text: &str,
        #[case] query: &str,
        #[case] expected: Vec<Range<usize>>,
    ) {
        assert_eq!(highlight_ranges(text, query), expected);
    }

    #[test]
    fn highlight_ranges_respect_char_boundaries() {
        let text = "Café Ésté";
        let ranges = highlight_ranges(text, "é");
        for r in &ranges {
            assert_eq!(&text[r.clone()].to_lowercase(), "é");
        }
        assert_eq!(ranges.len(), 3);
    }

    #[test]
    fn split_highlighted_alternates_segments() {
        let text = "RCB00027 - Phelobotomy";
        let parts = split_highlighted(text, &highlight_ranges(text, "phe"));
        assert_eq!(parts, vec![("RCB00027 - ", false), ("Phe", true), ("lobotomy", false)]);
    }
}
