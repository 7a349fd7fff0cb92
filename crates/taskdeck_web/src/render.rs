//! HTML rendering for the task-list page.
//!
//! # Responsibility
//! - Render the full page from a store snapshot in one pass.
//! - Keep every stable test identifier and UI literal in one place.
//!
//! # Invariants
//! - Task text and pending input are user input and always escaped.
//! - The success notice is emitted only while the notice flag is
//!   visible at render time.

use std::time::Instant;
use taskdeck_core::{TaskListStore, PAGE_TITLE, SUCCESS_MESSAGE};

/// Renders the complete page for the store state at `now`.
///
/// The visible notice carries an inline timeout that removes the
/// element once the remaining notice time elapses, so the 2s auto-hide
/// is observable in the rendered page without re-requesting it.
pub fn render_page(store: &TaskListStore, now: Instant) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{PAGE_TITLE}</title>\n"));
    html.push_str("</head>\n<body>\n<div id=\"app\">\n");
    html.push_str("<h1>Task Manager</h1>\n");

    html.push_str("<form action=\"/add\" method=\"post\">\n");
    html.push_str(&format!(
        "<input type=\"text\" name=\"task\" data-testid=\"task-input\" \
         placeholder=\"Enter a new task\" value=\"{}\">\n",
        escape_html(store.pending_input())
    ));
    html.push_str("<button type=\"submit\" data-testid=\"add-btn\">Add Task</button>\n");
    html.push_str("</form>\n");

    if let Some(remaining) = store.notice_remaining(now) {
        html.push_str(&format!(
            "<p data-testid=\"success-message\">{SUCCESS_MESSAGE}</p>\n"
        ));
        html.push_str(&format!(
            "<script>setTimeout(function () {{\n\
             var notice = document.querySelector('[data-testid=\"success-message\"]');\n\
             if (notice) {{ notice.remove(); }}\n\
             }}, {});</script>\n",
            remaining.as_millis()
        ));
    }

    html.push_str(&format!(
        "<p data-testid=\"task-count\">Total tasks: {}</p>\n",
        store.task_count()
    ));

    html.push_str("<ul>\n");
    for (index, task) in store.tasks().iter().enumerate() {
        html.push_str(&format!(
            "<li><span data-testid=\"task-{index}\">{}</span> \
             <form action=\"/delete/{index}\" method=\"post\" style=\"display:inline\">\
             <button type=\"submit\" data-testid=\"delete-btn-{index}\">Delete</button>\
             </form></li>\n",
            escape_html(task)
        ));
    }
    html.push_str("</ul>\n</div>\n</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
