use serde::{Deserialize, Serialize};

/// A position in the compliance-framework classification hierarchy.
///
/// Tag strings like `"AC-3 (1) (b)"` parse to the segment sequence
/// `["AC", "3", "1", "b"]`. A path built from a classification tree
/// selection covers a tag when its segments are a prefix of the tag's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPath {
    pub segments: Vec<String>,
}

impl CategoryPath {
    /// Build a path directly from tree-selection segments
    #[must_use]
    pub fn from_segments(segments: Vec<String>) -> Self {
        Self {
            segments: segments.into_iter().map(|s| normalize(&s)).collect(),
        }
    }

    /// Parse a raw category tag. Returns `None` for strings that are not
    /// classification references (revision markers, free text).
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let dash = tag.find('-')?;
        let family = &tag[..dash];
        if family.is_empty() || !family.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        let rest = &tag[dash + 1..];
        let number_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if number_end == 0 {
            return None;
        }

        let mut segments = vec![normalize(family), rest[..number_end].to_string()];

        // Remaining sub-specifiers: parenthesized or bare tokens
        for token in rest[number_end..]
            .split(|c: char| c == '(' || c == ')' || c.is_whitespace() || c == '.')
        {
            let token = token.trim();
            if !token.is_empty() {
                segments.push(normalize(token));
            }
        }

        Some(Self { segments })
    }

    /// Whether this path covers `tag`: every segment of `self` matches the
    /// corresponding leading segment of `tag`.
    #[must_use]
    pub fn covers(&self, tag: &Self) -> bool {
        self.segments.len() <= tag.segments.len()
            && self
                .segments
                .iter()
                .zip(tag.segments.iter())
                .all(|(a, b)| a == b)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn normalize(segment: &str) -> String {
    segment.trim().to_ascii_uppercase()
}
