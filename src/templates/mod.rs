//! HTML templates and styling for the notes client.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants and theme definitions
//! - `components` - Shared HTML components (nav bar, messages, base template)
//! - `citations` - Citation links and tooltips for answers and note bodies
//! - `lists` - Note and group lists with multi-select
//! - `pages` - Login, note, group, ask, answer and search pages

mod styles;
mod components;
mod citations;
mod lists;
mod pages;

pub use components::{base_html, html_escape, MessageKind};
pub use lists::{render_groups_list, render_notes_list, Flash, ViewMode};
pub use pages::{
    render_answer, render_ask, render_error_page, render_group_detail, render_login, render_note_form,
    render_note_view, render_register, render_search, SearchFormValues,
};
