//! Note and group list pages with multi-select.
//!
//! Row selection and navigation are separate controls: the checkbox button
//! posts a toggle, the title is a plain link. No client-side script decides
//! which one a click meant.

use super::components::{format_date, html_escape, message, post_button, MessageKind};
use crate::models::{Group, Note};
use crate::selection::SelectionController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Tiles,
    List,
}

impl ViewMode {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("list") => ViewMode::List,
            _ => ViewMode::Tiles,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Tiles => "tiles",
            ViewMode::List => "list",
        }
    }
}

/// A one-off message shown above the list after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: MessageKind,
    pub text: String,
}

impl Flash {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }
}

struct Row {
    id: i64,
    title: String,
    snippet: Option<String>,
    meta: Option<String>,
}

struct ListPage<'a> {
    heading: &'a str,
    base: &'a str,
    singular: &'a str,
    plural: &'a str,
    empty: &'a str,
    header_actions: String,
}

fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

fn snippet(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

fn view_toggle(base: &str, mode: ViewMode) -> String {
    let class = |m: ViewMode| if m == mode { "btn small secondary active" } else { "btn small secondary" };
    format!(
        r#"<a class="{}" href="{base}?view=tiles" title="Tile view">Tiles</a>
           <a class="{}" href="{base}?view=list" title="List view">List</a>"#,
        class(ViewMode::Tiles),
        class(ViewMode::List),
        base = base,
    )
}

fn render_list_page(
    page: ListPage<'_>,
    rows: &[Row],
    selected: &dyn Fn(i64) -> bool,
    selected_count: usize,
    all_selected: bool,
    mode: ViewMode,
    flash: Option<&Flash>,
) -> String {
    let view = mode.as_str();
    let mut html = String::new();

    html.push_str(&format!(
        r#"<div class="page-header"><h1>{}</h1><div class="header-actions">{}{}</div></div>"#,
        html_escape(page.heading),
        view_toggle(page.base, mode),
        page.header_actions
    ));

    if let Some(flash) = flash {
        html.push_str(&message(flash.kind, &flash.text));
    }

    if selected_count > 0 {
        html.push_str(&format!(
            r#"<div class="selection-bar"><span class="selection-bar-text">{} selected</span>{}{}</div>"#,
            pluralize(selected_count, page.singular, page.plural),
            post_button(
                &format!("{}/select-all?view={}", page.base, view),
                if all_selected { "Deselect All" } else { "Select All" },
                "btn small secondary"
            ),
            post_button(
                &format!("{}/bulk-delete?view={}", page.base, view),
                "Delete Selected",
                "btn small danger"
            ),
        ));
    }

    if rows.is_empty() {
        html.push_str(&format!(r#"<div class="empty-state"><p>{}</p></div>"#, html_escape(page.empty)));
        return html;
    }

    let checkbox = |row: &Row| {
        let is_selected = selected(row.id);
        format!(
            r#"<form class="inline-form" method="POST" action="{base}/select/{id}?view={view}"><button type="submit" class="select-toggle" title="{label}" aria-pressed="{pressed}">{mark}</button></form>"#,
            base = page.base,
            id = row.id,
            view = view,
            label = if is_selected { "Deselect" } else { "Select" },
            pressed = is_selected,
            mark = if is_selected { "&#10003;" } else { "&nbsp;" },
        )
    };
    let delete_button = |row: &Row| {
        post_button(
            &format!("{}/{}/delete?view={}", page.base, row.id, view),
            "Delete",
            "btn small danger",
        )
    };

    match mode {
        ViewMode::Tiles => {
            html.push_str(r#"<div class="note-grid">"#);
            for row in rows {
                html.push_str(&format!(
                    r#"<div class="note-card{selected}">
                        <div class="note-card-header">{checkbox}<a class="note-card-title" href="{base}/{id}">{title}</a></div>
                        {snippet}
                        <div class="note-card-footer"><span>{meta}</span>{delete}</div>
                    </div>"#,
                    selected = if selected(row.id) { " selected" } else { "" },
                    checkbox = checkbox(row),
                    base = page.base,
                    id = row.id,
                    title = html_escape(&row.title),
                    snippet = row
                        .snippet
                        .as_deref()
                        .map(|s| format!(r#"<p class="note-card-content">{}</p>"#, html_escape(s)))
                        .unwrap_or_default(),
                    meta = html_escape(row.meta.as_deref().unwrap_or("")),
                    delete = delete_button(row),
                ));
            }
            html.push_str("</div>");
        }
        ViewMode::List => {
            html.push_str(r#"<ul class="note-list">"#);
            for row in rows {
                html.push_str(&format!(
                    r#"<li class="note-list-item{selected}">{checkbox}<a class="title" href="{base}/{id}">{title}</a><span class="meta">{meta}</span></li>"#,
                    selected = if selected(row.id) { " selected" } else { "" },
                    checkbox = checkbox(row),
                    base = page.base,
                    id = row.id,
                    title = html_escape(&row.title),
                    meta = html_escape(row.meta.as_deref().unwrap_or("")),
                ));
            }
            html.push_str("</ul>");
        }
    }

    html
}

// ============================================================================
// Notes
// ============================================================================

pub fn render_notes_list(view: &SelectionController<Note>, mode: ViewMode, flash: Option<&Flash>) -> String {
    let rows: Vec<Row> = view
        .items()
        .iter()
        .map(|note| Row {
            id: note.id,
            title: note.title.clone(),
            snippet: Some(snippet(&note.content, 200)),
            meta: Some(format!("Updated: {}", format_date(&note.updated_at))),
        })
        .collect();

    let page = ListPage {
        heading: "My Notes",
        base: "/notes",
        singular: "note",
        plural: "notes",
        empty: "No notes yet. Create your first note!",
        header_actions: r#"<a class="btn" href="/notes/new">Create New Note</a>"#.to_string(),
    };

    render_list_page(
        page,
        &rows,
        &|id| view.is_selected(id),
        view.selected_count(),
        view.all_selected(),
        mode,
        flash,
    )
}

// ============================================================================
// Groups
// ============================================================================

pub fn render_groups_list(view: &SelectionController<Group>, mode: ViewMode, flash: Option<&Flash>) -> String {
    let rows: Vec<Row> = view
        .items()
        .iter()
        .map(|group| Row {
            id: group.id,
            title: group.display_title(),
            snippet: None,
            meta: Some(format!("{} note(s)", group.notes.len())),
        })
        .collect();

    let page = ListPage {
        heading: "My Groups",
        base: "/groups",
        singular: "group",
        plural: "groups",
        empty: "No groups yet. Click \"Group Notes\" to cluster your notes into groups.",
        header_actions: post_button("/groups/clusterize", "Group Notes", "btn"),
    };

    render_list_page(
        page,
        &rows,
        &|id| view.is_selected(id),
        view.selected_count(),
        view.all_selected(),
        mode,
        flash,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: i64, title: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: "body".to_string(),
            user_id: None,
            group_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            references: Default::default(),
        }
    }

    #[test]
    fn test_selection_bar_hidden_without_selection() {
        let view = SelectionController::new(vec![note(1, "a")]);
        let html = render_notes_list(&view, ViewMode::Tiles, None);
        assert!(!html.contains("selection-bar"));
        assert!(html.contains(r#"href="/notes/1""#));
    }

    #[test]
    fn test_selection_bar_label_follows_state() {
        let mut view = SelectionController::new(vec![note(1, "a"), note(2, "b")]);
        view.toggle(1);
        let html = render_notes_list(&view, ViewMode::List, None);
        assert!(html.contains("1 note selected"));
        assert!(html.contains("Select All"));
        assert!(html.contains("/notes/select-all?view=list"));

        view.toggle(2);
        let html = render_notes_list(&view, ViewMode::List, None);
        assert!(html.contains("2 notes selected"));
        assert!(html.contains("Deselect All"));
    }

    #[test]
    fn test_titles_are_escaped_and_flash_shown() {
        let view = SelectionController::new(vec![note(1, "<x>")]);
        let html = render_notes_list(&view, ViewMode::List, Some(&Flash::error("Failed to delete 1 note(s)")));
        assert!(html.contains("&lt;x&gt;"));
        assert!(html.contains(r#"<div class="message error">Failed to delete 1 note(s)</div>"#));
    }

    #[test]
    fn test_empty_groups_message() {
        let view: SelectionController<Group> = SelectionController::new(Vec::new());
        let html = render_groups_list(&view, ViewMode::Tiles, None);
        assert!(html.contains("No groups yet."));
        assert!(html.contains("/groups/clusterize"));
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!(ViewMode::parse(Some("list")), ViewMode::List);
        assert_eq!(ViewMode::parse(Some("weird")), ViewMode::Tiles);
        assert_eq!(ViewMode::parse(None), ViewMode::Tiles);
    }
}
