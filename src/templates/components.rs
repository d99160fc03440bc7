//! Shared HTML components for the notes client.
//!
//! Contains the navigation bar, flash messages and the base HTML template.

use chrono::{DateTime, Utc};

use super::styles::STYLE;

// ============================================================================
// Text Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar(user: Option<&str>) -> String {
    match user {
        Some(name) => format!(
            r#"<nav class="nav-bar">
            <a href="/notes">Notes</a>
            <a href="/groups">Groups</a>
            <a href="/search">Search</a>
            <a href="/ask">Ask</a>
            <span class="spacer"></span>
            <span class="user">{}</span>
            <a href="/logout">Logout</a>
        </nav>"#,
            html_escape(name)
        ),
        None => r#"<nav class="nav-bar">
            <span class="spacer"></span>
            <a href="/login">Login</a>
            <a href="/register">Register</a>
        </nav>"#
            .to_string(),
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
}

pub fn message(kind: MessageKind, text: &str) -> String {
    let class = match kind {
        MessageKind::Error => "error",
        MessageKind::Success => "success",
    };
    format!(r#"<div class="message {}">{}</div>"#, class, html_escape(text))
}

/// A small POST form rendered as a single button.
pub fn post_button(action: &str, label: &str, class: &str) -> String {
    format!(
        r#"<form class="inline-form" method="POST" action="{}"><button type="submit" class="{}">{}</button></form>"#,
        html_escape(action),
        class,
        html_escape(label)
    )
}

// ============================================================================
// Base Template
// ============================================================================

/// `user` is the logged-in display name; `None` renders the anonymous nav.
pub fn base_html(title: &str, content: &str, user: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
</body>
</html>"#,
        title = html_escape(title),
        STYLE = STYLE,
        nav = nav_bar(user),
        content = content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_nav_bar_escapes_user_name() {
        let nav = nav_bar(Some("<script>"));
        assert!(nav.contains("&lt;script&gt;"));
        assert!(nav.contains("/logout"));
        assert!(nav_bar(None).contains("/login"));
    }

    #[test]
    fn test_base_html_escapes_title() {
        let page = base_html("a < b", "<p>body</p>", None);
        assert!(page.contains("<title>a &lt; b</title>"));
        assert!(page.contains("<p>body</p>"));
    }
}
