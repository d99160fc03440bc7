//! HTML for citation-annotated text.
//!
//! Each resolved citation renders as a `[n]` link with a hover/focus tooltip
//! holding the cited chunk. Where the link points is up to the caller.

use super::components::html_escape;
use crate::presentation::{Block, CitationWidget, Node};

fn citation_html(widget: &CitationWidget, href: &dyn Fn(&CitationWidget) -> String) -> String {
    format!(
        r#"<span class="citation-wrapper"><a class="citation-link" href="{href}">{label}</a><span class="citation-tooltip" role="tooltip">{chunk}</span></span>"#,
        href = html_escape(&href(widget)),
        label = html_escape(&widget.label()),
        chunk = html_escape(widget.chunk_text()),
    )
}

fn nodes_html(nodes: &[Node], href: &dyn Fn(&CitationWidget) -> String) -> String {
    nodes
        .iter()
        .map(|node| match node {
            Node::Text(text) => html_escape(text),
            Node::Citation(widget) => citation_html(widget, href),
        })
        .collect()
}

/// Inline rendering for answers. Newlines survive via `white-space: pre-wrap`
/// on the container.
pub fn render_inline(nodes: &[Node], href: &dyn Fn(&CitationWidget) -> String) -> String {
    format!(r#"<span>{}</span>"#, nodes_html(nodes, href))
}

/// Paragraph rendering for note bodies.
pub fn render_paragraphs(blocks: &[Block], href: &dyn Fn(&CitationWidget) -> String) -> String {
    blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(nodes) => format!("<p>{}</p>", nodes_html(nodes, href)),
            Block::Break => "<br>".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reference, ReferenceMap};
    use crate::presentation::{inline_nodes, paragraph_blocks};

    fn refs() -> ReferenceMap {
        let mut map = ReferenceMap::new();
        map.insert(
            "1".to_string(),
            Reference {
                chunk_text: "<b>cited</b>".to_string(),
                note_id: 8,
                chunk_id: None,
            },
        );
        map
    }

    fn href(widget: &CitationWidget) -> String {
        format!("/answers/1/citations/{}", widget.number())
    }

    #[test]
    fn test_inline_citation_markup() {
        let html = render_inline(&inline_nodes("x [1] y [2]", &refs()), &href);
        assert!(html.contains(r#"<a class="citation-link" href="/answers/1/citations/1">[1]</a>"#));
        assert!(html.contains("&lt;b&gt;cited&lt;/b&gt;"));
        // Unresolved marker is plain text, no link.
        assert!(html.contains(" y [2]"));
        assert!(!html.contains("citations/2"));
    }

    #[test]
    fn test_paragraph_markup() {
        let html = render_paragraphs(&paragraph_blocks("one\n\ntwo <i>", &ReferenceMap::new()), &href);
        assert_eq!(html, "<p>one</p>\n<br>\n<p>two &lt;i&gt;</p>");
    }
}
