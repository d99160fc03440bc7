//! CSS styles for the notes client.
//!
//! Contains the main STYLE constant with all CSS for the web interface.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --yellow: #b58900;
    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
    --highlight: #fef08a;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 900px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }

.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    flex-wrap: wrap;
    z-index: 100;
}

.nav-bar a { font-size: 0.9rem; }
.nav-bar .spacer { flex: 1; }
.nav-bar .user { font-size: 0.85rem; color: var(--muted); }

.page-header {
    display: flex;
    justify-content: space-between;
    align-items: baseline;
    gap: 1rem;
    flex-wrap: wrap;
}

.header-actions { display: flex; gap: 0.5rem; align-items: center; }
.inline-form { display: inline; }

.btn {
    padding: 0.5rem 1rem;
    border: 1px solid var(--base1);
    border-radius: 4px;
    background: var(--blue);
    color: var(--base3);
    cursor: pointer;
    font-size: 0.9rem;
    font-family: inherit;
    text-decoration: none;
    display: inline-block;
}

.btn:hover { background: var(--cyan); border-color: var(--cyan); }
.btn.secondary { background: var(--base2); color: var(--base00); border-color: var(--base1); }
.btn.secondary:hover { background: var(--base3); }
.btn.danger { background: var(--red); border-color: var(--red); }
.btn.small { padding: 0.2rem 0.6rem; font-size: 0.8rem; }
.btn.active { background: var(--base01); }
.btn[disabled] { opacity: 0.6; cursor: default; }

.message {
    padding: 0.75rem 1rem;
    border-radius: 4px;
    margin-bottom: 1rem;
}
.message.error { background: #fdf2f2; color: var(--red); border: 1px solid var(--red); }
.message.success { background: #f5f9f5; color: var(--green); border: 1px solid var(--green); }

.back-link {
    display: inline-block;
    margin-bottom: 1rem;
    font-size: 0.9rem;
}

.empty-state { color: var(--muted); padding: 2rem 0; text-align: center; }

/* Selection */
.selection-bar {
    display: flex;
    gap: 0.75rem;
    align-items: center;
    padding: 0.5rem 0.75rem;
    margin: 1rem 0;
    background: var(--accent);
    border-radius: 4px;
}
.selection-bar-text { flex: 1; font-size: 0.9rem; }

.select-toggle {
    background: none;
    border: 1px solid var(--base1);
    border-radius: 3px;
    width: 1.3rem;
    height: 1.3rem;
    line-height: 1;
    cursor: pointer;
    color: var(--blue);
    font-size: 0.9rem;
}

/* Tiles */
.note-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
    gap: 1rem;
    margin-top: 1rem;
}

.note-card {
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 0.75rem;
    display: flex;
    flex-direction: column;
    gap: 0.5rem;
}
.note-card.selected { border-color: var(--blue); background: #f2f7fb; }
.note-card-header { display: flex; gap: 0.5rem; align-items: flex-start; }
.note-card-title { flex: 1; font-weight: 600; }
.note-card-content {
    font-size: 0.85rem;
    overflow: hidden;
    display: -webkit-box;
    -webkit-line-clamp: 4;
    -webkit-box-orient: vertical;
}
.note-card-footer { display: flex; justify-content: space-between; align-items: center; font-size: 0.75rem; color: var(--muted); }

/* List rows */
.note-list { list-style: none; margin-top: 1rem; }
.note-list-item {
    padding: 0.5rem 0;
    border-bottom: 1px solid var(--border);
    display: flex;
    gap: 0.75rem;
    align-items: center;
}
.note-list-item.selected { background: #f2f7fb; }
.note-list-item .title { flex: 1; }
.note-list-item .meta { font-size: 0.8rem; color: var(--muted); white-space: nowrap; }

/* Note and answer bodies */
.note-meta { font-size: 0.8rem; color: var(--muted); display: flex; gap: 1rem; margin-bottom: 1rem; }
.note-content p { margin-bottom: 0.5rem; }
.answer-content { white-space: pre-wrap; }
.answer-question { margin-bottom: 0.25rem; }

/* Citations */
.citation-wrapper { position: relative; display: inline; }
.citation-link { font-size: 0.85em; vertical-align: super; cursor: pointer; }
.citation-tooltip {
    display: none;
    position: absolute;
    left: 0;
    bottom: 1.6em;
    width: 320px;
    max-height: 200px;
    overflow-y: auto;
    padding: 0.5rem 0.75rem;
    background: var(--bg);
    border: 1px solid var(--base1);
    border-radius: 4px;
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.15);
    font-size: 0.85rem;
    white-space: normal;
    z-index: 50;
}
.citation-wrapper:hover .citation-tooltip,
.citation-wrapper:focus-within .citation-tooltip { display: block; }

/* Forms */
.form-group { margin-bottom: 1rem; display: flex; flex-direction: column; gap: 0.25rem; }
.form-row { display: flex; gap: 1rem; }
.form-input {
    padding: 0.5rem 0.75rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font-size: 0.95rem;
    font-family: inherit;
}
.form-textarea { min-height: 12rem; resize: vertical; }

.login-form {
    max-width: 300px;
    margin: 4rem auto;
    padding: 2rem;
    background: var(--accent);
    border-radius: 8px;
}

.login-form h1 {
    margin-top: 0;
    margin-bottom: 1.5rem;
    text-align: center;
}

.login-form input {
    width: 100%;
    padding: 0.75rem;
    margin-bottom: 1rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font-size: 1rem;
}

.login-form button {
    width: 100%;
    padding: 0.75rem;
    background: var(--link);
    color: white;
    border: none;
    border-radius: 4px;
    font-size: 1rem;
    cursor: pointer;
}

.login-form button:hover { background: var(--link-hover); }
.login-form .alt { margin-top: 1rem; text-align: center; font-size: 0.9rem; }

/* Ask and search */
.answer-list { list-style: none; margin-top: 1rem; }
.answer-list li { padding: 0.4rem 0; border-bottom: 1px solid var(--border); }
.answer-list .meta { font-size: 0.75rem; color: var(--muted); margin-left: 0.5rem; }

.search-result {
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 0.75rem;
    margin-top: 1rem;
}
.search-result-header { display: flex; justify-content: space-between; align-items: baseline; gap: 1rem; }
.search-result-score { font-size: 0.8rem; color: var(--muted); }
.search-result details summary { cursor: pointer; font-size: 0.85rem; }
.search-result .chunk-text { white-space: pre-wrap; font-size: 0.9rem; margin-top: 0.5rem; }
.search-result mark { background: var(--highlight); padding: 2px 4px; border-radius: 3px; }
"#;
