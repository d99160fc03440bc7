//! Tests for citation parsing and resolution.

use super::*;
use crate::models::Reference;
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn refs(entries: &[(&str, &str, NoteId)]) -> ReferenceMap {
    entries
        .iter()
        .map(|(number, chunk, note_id)| {
            (
                number.to_string(),
                Reference {
                    chunk_text: chunk.to_string(),
                    note_id: *note_id,
                    chunk_id: None,
                },
            )
        })
        .collect()
}

fn cite(number: &str, chunk: &str, note_id: Option<NoteId>) -> Segment {
    Segment::Citation {
        number: number.to_string(),
        chunk_text: chunk.to_string(),
        note_id,
    }
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolves_known_and_flags_unknown_numbers() {
    let segments = parse_citations("See [1] and [2].", &refs(&[("1", "A", 5)])).unwrap();
    assert_eq!(
        segments,
        vec![
            Segment::text("See "),
            cite("1", "A", Some(5)),
            Segment::text(" and "),
            cite("2", "", None),
            Segment::text("."),
        ]
    );
}

#[test]
fn test_adjacent_markers_produce_no_empty_text() {
    let segments =
        parse_citations("[1][2]", &refs(&[("1", "a", 1), ("2", "b", 2)])).unwrap();
    assert_eq!(segments, vec![cite("1", "a", Some(1)), cite("2", "b", Some(2))]);
}

#[test]
fn test_repeated_marker_resolves_each_occurrence() {
    let segments = parse_citations("x [3] y [3]", &refs(&[("3", "c", 9)])).unwrap();
    let resolved = segments.iter().filter(|s| s.is_resolved()).count();
    assert_eq!(resolved, 2);
}

#[test]
fn test_leading_zeros_are_not_normalized() {
    let segments = parse_citations("[01]", &refs(&[("1", "a", 1)])).unwrap();
    assert_eq!(segments, vec![cite("01", "", None)]);
}

#[test]
fn test_malformed_markers_stay_literal() {
    let text = "[] [a] [1 ] [-2] [[3]]";
    let segments = parse_citations(text, &refs(&[("3", "c", 3)])).unwrap();
    assert_eq!(
        segments,
        vec![
            Segment::text("[] [a] [1 ] [-2] ["),
            cite("3", "c", Some(3)),
            Segment::text("]"),
        ]
    );
}

#[test]
fn test_non_ascii_digits_are_not_markers() {
    // Arabic-Indic digit one.
    let text = "see [\u{0661}]";
    let segments = parse_citations(text, &refs(&[("1", "a", 1)])).unwrap();
    assert_eq!(segments, vec![Segment::text(text)]);
}

#[test]
fn test_multiline_text_is_kept_in_one_segment() {
    let segments = parse_citations("first\n\nsecond [1]\nthird", &refs(&[("1", "a", 1)])).unwrap();
    assert_eq!(segments[0], Segment::text("first\n\nsecond "));
    assert_eq!(segments[2], Segment::text("\nthird"));
}

// ============================================================================
// No-annotation Shortcut and Degenerate Cases
// ============================================================================

#[test]
fn test_empty_reference_map_returns_none() {
    let empty = ReferenceMap::new();
    assert!(parse_citations("See [1].", &empty).is_none());
    assert!(parse_citations("", &empty).is_none());
}

#[test]
fn test_no_markers_yields_single_text_segment() {
    let segments = parse_citations("plain text", &refs(&[("1", "a", 1)])).unwrap();
    assert_eq!(segments, vec![Segment::text("plain text")]);
}

#[test]
fn test_empty_text_yields_single_empty_segment() {
    let segments = parse_citations("", &refs(&[("1", "a", 1)])).unwrap();
    assert_eq!(segments, vec![Segment::text("")]);
}

#[test]
fn test_segments_serialize_with_type_tag() {
    let json = serde_json::to_value(cite("1", "a", Some(2))).unwrap();
    assert_eq!(json["type"], "citation");
    assert_eq!(json["number"], "1");
}

// ============================================================================
// Round-trip Property
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    // Bias towards brackets and digits so markers actually occur.
    prop::collection::vec(
        prop_oneof![
            Just("[".to_string()),
            Just("]".to_string()),
            "[0-9]{1,3}",
            "\\[[0-9]{1,2}\\]",
            "[a-z \n]{0,4}",
            any::<char>().prop_map(|c| c.to_string()),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

fn arb_refs() -> impl Strategy<Value = ReferenceMap> {
    prop::collection::hash_map(
        (0u32..20).prop_map(|n| n.to_string()),
        ("[a-z ]{0,8}", 1i64..50).prop_map(|(chunk_text, note_id)| Reference {
            chunk_text,
            note_id,
            chunk_id: None,
        }),
        0..6,
    )
}

proptest! {
    #[test]
    fn prop_parse_is_lossless(text in arb_text(), references in arb_refs()) {
        match parse_citations(&text, &references) {
            Some(segments) => {
                prop_assert!(!segments.is_empty());
                prop_assert_eq!(reassemble(&segments), text);
            }
            None => prop_assert!(references.is_empty()),
        }
    }

    #[test]
    fn prop_resolution_matches_reference_map(text in arb_text(), references in arb_refs()) {
        if let Some(segments) = parse_citations(&text, &references) {
            for segment in &segments {
                if let Segment::Citation { number, note_id, chunk_text } = segment {
                    match references.get(number) {
                        Some(reference) => {
                            prop_assert_eq!(*note_id, Some(reference.note_id));
                            prop_assert_eq!(chunk_text, &reference.chunk_text);
                        }
                        None => prop_assert_eq!(*note_id, None),
                    }
                }
            }
        }
    }
}
