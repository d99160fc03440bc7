//! Citation presentation: turn parsed segments into renderable nodes.
//!
//! Answers are rendered inline, note bodies paragraph by paragraph. Both use
//! the same parser output and differ only in how text runs are laid out.

use crate::citations::{parse_citations, Segment};
use crate::models::{NoteId, ReferenceMap};
use crate::navigation::{Navigator, Route};

// ============================================================================
// Interactive Citation
// ============================================================================

/// A resolved citation: an always-visible `[n]` label, a disclosure revealing
/// the cited chunk, and an activation that navigates to the source note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationWidget {
    number: String,
    chunk_text: String,
    note_id: NoteId,
    disclosed: bool,
}

impl CitationWidget {
    pub fn new(number: impl Into<String>, chunk_text: impl Into<String>, note_id: NoteId) -> Self {
        Self {
            number: number.into(),
            chunk_text: chunk_text.into(),
            note_id,
            disclosed: false,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn label(&self) -> String {
        format!("[{}]", self.number)
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    pub fn chunk_text(&self) -> &str {
        &self.chunk_text
    }

    /// The chunk text, only while the disclosure is open.
    pub fn disclosure(&self) -> Option<&str> {
        self.disclosed.then_some(self.chunk_text.as_str())
    }

    pub fn is_disclosed(&self) -> bool {
        self.disclosed
    }

    pub fn show(&mut self) {
        self.disclosed = true;
    }

    pub fn hide(&mut self) {
        self.disclosed = false;
    }

    pub fn toggle_disclosure(&mut self) {
        self.disclosed = !self.disclosed;
    }

    /// Navigate to the cited note unless another control already handled
    /// this activation. Returns whether navigation fired.
    pub fn activate(&self, event: &mut Activation, navigator: &mut dyn Navigator) -> bool {
        if !event.claim() {
            return false;
        }
        navigator.navigate(Route::Note {
            id: self.note_id,
            return_to: event.return_to.clone(),
        });
        true
    }
}

/// One user activation (click, key press). The label and the disclosure
/// panel of a citation both receive it; only the first handler acts.
#[derive(Debug, Default)]
pub struct Activation {
    handled: bool,
    return_to: Option<String>,
}

impl Activation {
    pub fn new() -> Self {
        Self::default()
    }

    /// An activation that asks the destination to send the user back here.
    pub fn returning_to(path: impl Into<String>) -> Self {
        Self {
            handled: false,
            return_to: Some(path.into()),
        }
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }

    fn claim(&mut self) -> bool {
        !std::mem::replace(&mut self.handled, true)
    }
}

// ============================================================================
// Nodes and Layouts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Citation(CitationWidget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Node>),
    /// A blank source line.
    Break,
}

fn segment_to_node(segment: &Segment) -> Node {
    match segment {
        Segment::Text { content } => Node::Text(content.clone()),
        Segment::Citation {
            number,
            chunk_text,
            note_id: Some(note_id),
        } => Node::Citation(CitationWidget::new(number.as_str(), chunk_text.as_str(), *note_id)),
        Segment::Citation { number, note_id: None, .. } => Node::Text(format!("[{}]", number)),
    }
}

fn segments_or_plain(text: &str, references: &ReferenceMap) -> Vec<Segment> {
    parse_citations(text, references).unwrap_or_else(|| vec![Segment::text(text)])
}

/// Inline layout: one run of nodes, newlines left inside the text.
pub fn inline_nodes(text: &str, references: &ReferenceMap) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::new();
    for node in segments_or_plain(text, references).iter().map(segment_to_node) {
        // Unresolved markers become text; fold them into the neighbouring run.
        if let Node::Text(next) = &node {
            if let Some(Node::Text(prev)) = nodes.last_mut() {
                prev.push_str(next);
                continue;
            }
        }
        nodes.push(node);
    }
    nodes
}

/// Paragraph layout: each source line with visible content becomes a
/// paragraph, each blank line a break.
pub fn paragraph_blocks(text: &str, references: &ReferenceMap) -> Vec<Block> {
    let mut lines: Vec<Vec<Node>> = vec![Vec::new()];

    for node in inline_nodes(text, references) {
        match node {
            Node::Text(content) => {
                let mut parts = content.split('\n');
                if let Some(first) = parts.next() {
                    push_text(lines.last_mut(), first);
                }
                for part in parts {
                    lines.push(Vec::new());
                    push_text(lines.last_mut(), part);
                }
            }
            citation @ Node::Citation(_) => {
                if let Some(line) = lines.last_mut() {
                    line.push(citation);
                }
            }
        }
    }

    lines
        .into_iter()
        .map(|line| {
            let visible = line.iter().any(|node| match node {
                Node::Text(t) => !t.trim().is_empty(),
                Node::Citation(_) => true,
            });
            if visible {
                Block::Paragraph(line)
            } else {
                Block::Break
            }
        })
        .collect()
}

fn push_text(line: Option<&mut Vec<Node>>, text: &str) {
    if let Some(line) = line {
        if !text.is_empty() {
            line.push(Node::Text(text.to_string()));
        }
    }
}

/// Every resolved citation in document order.
pub fn citations(nodes: &[Node]) -> impl Iterator<Item = &CitationWidget> {
    nodes.iter().filter_map(|node| match node {
        Node::Citation(widget) => Some(widget),
        Node::Text(_) => None,
    })
}
