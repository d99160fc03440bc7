//! Page bodies for everything except the list views.
//!
//! Each function returns the inner HTML; handlers wrap it with `base_html`.

use super::citations::{render_inline, render_paragraphs};
use super::components::{format_date, html_escape, message, post_button, MessageKind};
use crate::models::{Answer, Group, Note, NoteId, SearchHit};
use crate::navigation::Route;
use crate::presentation::{inline_nodes, paragraph_blocks, CitationWidget};

fn error_block(error: Option<&str>) -> String {
    error.map(|e| message(MessageKind::Error, e)).unwrap_or_default()
}

fn back_link(target: &Route, label: &str) -> String {
    format!(
        r#"<a class="back-link" href="{}">&larr; {}</a>"#,
        html_escape(&target.path()),
        html_escape(label)
    )
}

/// A page that failed to load, with a way out.
pub fn render_error_page(error: &str, back: &Route, back_label: &str) -> String {
    format!("{}{}", message(MessageKind::Error, error), back_link(back, back_label))
}

// ============================================================================
// Login / Register
// ============================================================================

fn credentials_form(heading: &str, action: &str, button: &str, alt: &str, error: Option<&str>, username: &str) -> String {
    format!(
        r#"<div class="login-form">
            {error}
            <h1>{heading}</h1>
            <form method="POST" action="{action}">
                <input type="text" name="username" placeholder="Username" value="{username}" autofocus required>
                <input type="password" name="password" placeholder="Password" required>
                <button type="submit">{button}</button>
            </form>
            <p class="alt">{alt}</p>
        </div>"#,
        error = error_block(error),
        heading = heading,
        action = action,
        username = html_escape(username),
        button = button,
        alt = alt,
    )
}

pub fn render_login(error: Option<&str>, username: &str) -> String {
    credentials_form(
        "Login",
        "/login",
        "Login",
        r#"No account? <a href="/register">Register</a>"#,
        error,
        username,
    )
}

pub fn render_register(error: Option<&str>, username: &str) -> String {
    credentials_form(
        "Register",
        "/register",
        "Register",
        r#"Already registered? <a href="/login">Login</a>"#,
        error,
        username,
    )
}

// ============================================================================
// Notes
// ============================================================================

/// Full note: title, timestamps, body with citations, actions.
///
/// Citations inside the body send the reader to the cited note and back
/// here afterwards.
pub fn render_note_view(note: &Note, back: &Route) -> String {
    let here = format!("/notes/{}", note.id);
    let href = |widget: &CitationWidget| {
        Route::Note {
            id: widget.note_id(),
            return_to: Some(here.clone()),
        }
        .path()
    };
    let body = render_paragraphs(&paragraph_blocks(&note.content, &note.references), &href);

    let created = if note.created_at != note.updated_at {
        format!("<span>Created: {}</span>", format_date(&note.created_at))
    } else {
        String::new()
    };

    format!(
        r#"{back}
        <div class="page-header">
            <h1>{title}</h1>
            <div class="header-actions">
                <a class="btn secondary" href="{edit}">Edit</a>
                {delete}
            </div>
        </div>
        <div class="note-meta"><span>Updated: {updated}</span>{created}</div>
        <div class="note-content">{body}</div>"#,
        back = back_link(back, "Back"),
        title = html_escape(&note.title),
        edit = Route::EditNote(note.id).path(),
        delete = post_button(&format!("/notes/{}/delete", note.id), "Delete", "btn danger"),
        updated = format_date(&note.updated_at),
        created = created,
        body = body,
    )
}

/// Create form when `note_id` is `None`, edit form otherwise.
pub fn render_note_form(note_id: Option<NoteId>, title: &str, content: &str, error: Option<&str>) -> String {
    let (heading, action, button) = match note_id {
        Some(id) => ("Edit Note", format!("/notes/{}/edit", id), "Update Note"),
        None => ("Create New Note", "/notes/new".to_string(), "Create Note"),
    };
    let cancel = match note_id {
        Some(id) => format!("/notes/{}", id),
        None => Route::Notes.path(),
    };

    format!(
        r#"<h1>{heading}</h1>
        {error}
        <form method="POST" action="{action}" class="note-form">
            <div class="form-group">
                <label for="title">Title</label>
                <input type="text" id="title" name="title" class="form-input" value="{title}" required>
            </div>
            <div class="form-group">
                <label for="content">Content</label>
                <textarea id="content" name="content" class="form-input form-textarea" rows="15">{content}</textarea>
            </div>
            <div class="header-actions">
                <button type="submit" class="btn">{button}</button>
                <a class="btn secondary" href="{cancel}">Cancel</a>
            </div>
        </form>"#,
        heading = heading,
        error = error_block(error),
        action = action,
        title = html_escape(title),
        content = html_escape(content),
        button = button,
        cancel = cancel,
    )
}

// ============================================================================
// Groups
// ============================================================================

pub fn render_group_detail(group: &Group) -> String {
    let here = Route::Group(group.id).path();
    let summary = group
        .summary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!(r#"<p class="note-meta">{}</p>"#, html_escape(s)))
        .unwrap_or_default();

    let notes = if group.notes.is_empty() {
        r#"<div class="empty-state"><p>No notes in this group yet.</p></div>"#.to_string()
    } else {
        let cards: String = group
            .notes
            .iter()
            .map(|note| {
                let view = Route::Note {
                    id: note.id,
                    return_to: Some(here.clone()),
                };
                format!(
                    r#"<div class="note-card">
                        <div class="note-card-header"><a class="note-card-title" href="{href}">{title}</a></div>
                        <div class="note-card-footer"><span>Updated: {updated}</span>{delete}</div>
                    </div>"#,
                    href = html_escape(&view.path()),
                    title = html_escape(&note.title),
                    updated = format_date(&note.updated_at),
                    delete = post_button(
                        &format!("/notes/{}/delete?return_to={}", note.id, urlencoding::encode(&here)),
                        "Delete",
                        "btn small danger"
                    ),
                )
            })
            .collect();
        format!(r#"<div class="note-grid">{}</div>"#, cards)
    };

    format!(
        r#"{back}
        <h1>{title}</h1>
        {summary}
        <h2>Notes in this group ({count})</h2>
        {notes}"#,
        back = back_link(&Route::Groups, "Back to Groups"),
        title = html_escape(&group.display_title()),
        summary = summary,
        count = group.notes.len(),
        notes = notes,
    )
}

// ============================================================================
// Ask / Answers
// ============================================================================

pub fn render_ask(previous: &[Answer], query: &str, error: Option<&str>) -> String {
    let history = if previous.is_empty() {
        String::new()
    } else {
        let items: String = previous
            .iter()
            .map(|answer| {
                format!(
                    r#"<li><a href="{}">{}</a><span class="meta">{}</span></li>"#,
                    Route::Answer(answer.id).path(),
                    html_escape(&answer.title),
                    format_date(&answer.created_at)
                )
            })
            .collect();
        format!(r#"<h2>Previous Answers</h2><ul class="answer-list">{}</ul>"#, items)
    };

    format!(
        r#"<h1>Ask a Question</h1>
        <form method="POST" action="/ask">
            <div class="form-group">
                <label for="query">Your Question</label>
                <textarea id="query" name="query" class="form-input" rows="4" placeholder="Enter your question here..." required>{query}</textarea>
            </div>
            <button type="submit" class="btn">Ask Question</button>
        </form>
        {error}
        {history}"#,
        query = html_escape(query),
        error = error_block(error),
        history = history,
    )
}

/// Answer with inline citations. Each `[n]` link goes through the answer's
/// citation route so the cited note can send the reader back here.
pub fn render_answer(answer: &Answer, back: &Route, error: Option<&str>) -> String {
    let answer_id = answer.id;
    let href = move |widget: &CitationWidget| format!("/answers/{}/citations/{}", answer_id, widget.number());
    let body = render_inline(&inline_nodes(&answer.answer_text, &answer.references), &href);

    format!(
        r#"{back}
        {error}
        <div class="page-header">
            <h1>{title}</h1>
            <div class="header-actions">{convert}{delete}</div>
        </div>
        <p class="answer-question"><strong>Question:</strong> {question}</p>
        <p class="note-meta">Answered on {created}</p>
        <div class="answer-content">{body}</div>"#,
        back = back_link(back, "Back"),
        error = error_block(error),
        title = html_escape(&answer.title),
        convert = post_button(&format!("/answers/{}/convert", answer.id), "Add to Notes", "btn"),
        delete = post_button(&format!("/answers/{}/delete", answer.id), "Delete", "btn danger"),
        question = html_escape(&answer.question),
        created = format_date(&answer.created_at),
        body = body,
    )
}

// ============================================================================
// Search
// ============================================================================

/// Raw search form values, echoed back into the form.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFormValues {
    pub query: String,
    pub k: String,
    pub threshold: String,
}

pub fn format_relevance(score: f64) -> String {
    format!("{:.1}", score * 100.0)
}

/// Note content with the matched chunk wrapped in `<mark>`. Offsets are in
/// characters and clamped to the content; missing offsets mean no highlight.
pub fn highlight_chunk(content: &str, start: Option<usize>, end: Option<usize>) -> String {
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) => (s, e),
        _ => return html_escape(content),
    };

    let chars: Vec<char> = content.chars().collect();
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());

    let before: String = chars[..start].iter().collect();
    let chunk: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();

    format!(
        "{}<mark>{}</mark>{}",
        html_escape(&before),
        html_escape(&chunk),
        html_escape(&after)
    )
}

fn search_result(hit: &SearchHit) -> String {
    let snippet = match hit.chunk_text.as_deref().filter(|c| !c.is_empty()) {
        Some(chunk) => chunk.to_string(),
        None => hit.note.content.chars().take(200).collect(),
    };

    format!(
        r#"<div class="search-result">
            <div class="search-result-header">
                <a href="{href}"><strong>{title}</strong></a>
                <span class="search-result-score">Relevance: {score}%</span>
            </div>
            <p>{snippet}...</p>
            <details>
                <summary>Show in note</summary>
                <div class="chunk-text">{highlighted}</div>
            </details>
            <div class="note-meta">Updated: {updated}</div>
        </div>"#,
        href = Route::Note {
            id: hit.note.id,
            return_to: None
        }
        .path(),
        title = html_escape(&hit.note.title),
        score = format_relevance(hit.relevance_score),
        snippet = html_escape(&snippet),
        highlighted = highlight_chunk(&hit.note.content, hit.chunk_start, hit.chunk_end),
        updated = format_date(&hit.note.updated_at),
    )
}

/// `results` is `None` before the first search.
pub fn render_search(form: &SearchFormValues, results: Option<&[SearchHit]>, error: Option<&str>) -> String {
    let results_html = match results {
        None => String::new(),
        Some([]) if error.is_none() => {
            r#"<div class="empty-state"><p>No notes found matching your query.</p></div>"#.to_string()
        }
        Some([]) => String::new(),
        Some(hits) => format!(
            "<h2>Search Results ({})</h2>{}",
            hits.len(),
            hits.iter().map(search_result).collect::<String>()
        ),
    };

    format!(
        r#"<h1>Search Notes</h1>
        <form method="GET" action="/search">
            <div class="form-group">
                <label for="query">Search Query</label>
                <input id="query" name="query" type="text" class="form-input" placeholder="Enter your search query..." value="{query}">
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label for="k">Max Results</label>
                    <input id="k" name="k" type="number" class="form-input" min="1" max="100" value="{k}">
                </div>
                <div class="form-group">
                    <label for="threshold">Threshold</label>
                    <input id="threshold" name="threshold" type="number" class="form-input" min="0" max="1" step="0.1" value="{threshold}">
                </div>
            </div>
            <button type="submit" class="btn">Search</button>
        </form>
        {error}
        {results}"#,
        query = html_escape(&form.query),
        k = html_escape(&form.k),
        threshold = html_escape(&form.threshold),
        error = error_block(error),
        results = results_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reference, ReferenceMap};
    use chrono::{Duration, Utc};

    fn note(id: i64, content: &str) -> Note {
        let now = Utc::now();
        Note {
            id,
            title: format!("Note {}", id),
            content: content.to_string(),
            user_id: None,
            group_id: None,
            created_at: now,
            updated_at: now,
            references: ReferenceMap::new(),
        }
    }

    fn answer() -> Answer {
        let mut references = ReferenceMap::new();
        references.insert(
            "1".to_string(),
            Reference {
                chunk_text: "source".to_string(),
                note_id: 12,
                chunk_id: None,
            },
        );
        Answer {
            id: 4,
            user_id: None,
            question: "Why?".to_string(),
            answer_text: "Because [1].".to_string(),
            title: "Reasons".to_string(),
            references,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_highlight_chunk_by_char_offsets() {
        assert_eq!(highlight_chunk("héllo world", Some(1), Some(5)), "h<mark>éllo</mark> world");
        assert_eq!(highlight_chunk("abc", Some(2), Some(99)), "ab<mark>c</mark>");
        assert_eq!(highlight_chunk("abc", Some(9), Some(1)), "abc<mark></mark>");
        assert_eq!(highlight_chunk("<b>", None, Some(1)), "&lt;b&gt;");
    }

    #[test]
    fn test_relevance_percentage() {
        assert_eq!(format_relevance(0.8734), "87.3");
        assert_eq!(format_relevance(1.0), "100.0");
    }

    #[test]
    fn test_answer_citations_route_through_answer() {
        let html = render_answer(&answer(), &Route::Ask, None);
        assert!(html.contains(r#"href="/answers/4/citations/1""#));
        assert!(html.contains(r#"href="/ask""#));
    }

    #[test]
    fn test_note_view_hides_equal_created_timestamp() {
        let mut n = note(1, "line");
        let html = render_note_view(&n, &Route::Notes);
        assert!(!html.contains("Created:"));

        n.created_at = n.updated_at - Duration::days(1);
        let html = render_note_view(&n, &Route::Notes);
        assert!(html.contains("Created:"));
        assert!(html.contains("<p>line</p>"));
    }

    #[test]
    fn test_note_citations_return_to_the_note() {
        let mut n = note(3, "see [1]");
        n.references.insert(
            "1".to_string(),
            Reference {
                chunk_text: "x".to_string(),
                note_id: 9,
                chunk_id: None,
            },
        );
        let html = render_note_view(&n, &Route::Notes);
        assert!(html.contains(r#"href="/notes/9?return_to=%2Fnotes%2F3""#));
    }

    #[test]
    fn test_group_title_falls_back_to_id() {
        let group = Group {
            id: 7,
            user_id: None,
            summary: None,
            notes: vec![note(1, "x")],
        };
        let html = render_group_detail(&group);
        assert!(html.contains("<h1>Group 7</h1>"));
        assert!(html.contains("Notes in this group (1)"));
        assert!(html.contains("return_to=%2Fgroups%2F7"));
    }

    #[test]
    fn test_search_empty_results_message() {
        let form = SearchFormValues {
            query: "q".to_string(),
            k: "10".to_string(),
            threshold: "0.4".to_string(),
        };
        assert!(render_search(&form, Some([].as_slice()), None).contains("No notes found"));
        assert!(!render_search(&form, None, None).contains("No notes found"));
        assert!(!render_search(&form, Some([].as_slice()), Some("k must be a positive integer")).contains("No notes found"));
    }
}
