//! Citation parsing: split answer or note text into literal runs and `[n]`
//! citation markers, resolving each marker against the payload's reference map.
//!
//! The parse is lossless. Concatenating [`Segment::source_text`] over the
//! output reproduces the input byte for byte.

use crate::models::{NoteId, ReferenceMap};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::LazyLock;

#[cfg(test)]
#[path = "citations_test.rs"]
mod citations_test;

/// `[` one or more ASCII digits `]`. `\d` would also admit non-ASCII digits.
static CITATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]+)\]").expect("citation marker pattern is valid"));

// ============================================================================
// Segments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Literal text, possibly spanning several lines.
    Text { content: String },
    /// A citation marker. `note_id` is `None` when the number had no entry in
    /// the reference map; such markers render as plain bracket text.
    Citation {
        number: String,
        chunk_text: String,
        note_id: Option<NoteId>,
    },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    /// The exact slice of input this segment was parsed from.
    pub fn source_text(&self) -> Cow<'_, str> {
        match self {
            Segment::Text { content } => Cow::Borrowed(content),
            Segment::Citation { number, .. } => Cow::Owned(format!("[{}]", number)),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Segment::Citation { note_id: Some(_), .. })
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Split `text` into text and citation segments.
///
/// Returns `None` when `references` is empty: there is nothing to annotate and
/// the caller should render `text` as-is. With a non-empty map the result is
/// always `Some`, and holds at least one segment.
pub fn parse_citations(text: &str, references: &ReferenceMap) -> Option<Vec<Segment>> {
    if references.is_empty() {
        return None;
    }

    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in CITATION_MARKER.captures_iter(text) {
        let (Some(marker), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if marker.start() > last_end {
            segments.push(Segment::text(&text[last_end..marker.start()]));
        }

        let number = digits.as_str().to_string();
        let segment = match references.get(&number) {
            Some(reference) => Segment::Citation {
                number,
                chunk_text: reference.chunk_text.clone(),
                note_id: Some(reference.note_id),
            },
            None => Segment::Citation {
                number,
                chunk_text: String::new(),
                note_id: None,
            },
        };
        segments.push(segment);

        last_end = marker.end();
    }

    if last_end < text.len() {
        segments.push(Segment::text(&text[last_end..]));
    }

    if segments.is_empty() {
        segments.push(Segment::text(text));
    }

    Some(segments)
}

/// Rebuild the source text from parsed segments.
pub fn reassemble(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.source_text()).collect()
}
