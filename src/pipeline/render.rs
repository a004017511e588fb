//! Rendering of file info and extracted fields.
//!
//! Every value that came from outside (file names, field labels, field
//! values) goes through [`escape_html`] before it is placed in markup.

use crate::output::StructuredResult;
use crate::pipeline::input::SelectedFile;

/// Shown in the result area when the service returned no fields.
pub const NO_FIELDS_PLACEHOLDER: &str = "No structured fields were extracted.";

/// Shown in the result area after any non-precondition failure.
pub const FAILURE_NOTE: &str = "The file could not be processed. Check the logs for details.";

const RESULT_HEADING: &str = "Extracted structured data:";

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Size in kilobytes with two decimals: `1536` → `"1.50 KB"`.
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

pub fn file_info_html(file: &SelectedFile) -> String {
    format!(
        "Selected file: <strong>{}</strong><br>\nSize: <strong>{}</strong>",
        escape_html(file.name()),
        format_size_kb(file.size())
    )
}

pub fn file_info_text(file: &SelectedFile) -> String {
    format!("{} ({})", file.name(), format_size_kb(file.size()))
}

/// Markup for the result area.
pub fn result_html(result: &StructuredResult) -> String {
    let body = if result.is_empty() {
        format!("<em>{NO_FIELDS_PLACEHOLDER}</em>")
    } else {
        result
            .iter()
            .map(|(k, v)| {
                format!(
                    "<strong>{}:</strong> {}<br>",
                    escape_html(k),
                    escape_html(v)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("<strong>{RESULT_HEADING}</strong><br><br>\n{body}")
}

/// `key: value` lines for terminals.
pub fn result_text(result: &StructuredResult) -> String {
    if result.is_empty() {
        return NO_FIELDS_PLACEHOLDER.to_string();
    }
    result
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}
