use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("html to markdown conversion failed: {0}")]
pub struct ConvertError(pub String);

pub trait Converter {
    fn to_markdown(&self, html: &str) -> Result<String, ConvertError>;
}

/// `html2md` based converter with ATX headings.
///
/// html2md renders `h1`/`h2` as setext headings; those are rewritten to
/// `#`/`##` so every heading level looks the same in the output. A panic
/// inside html2md is reported as a [`ConvertError`] instead of unwinding.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> Result<String, ConvertError> {
        if html.trim().is_empty() {
            return Ok(String::new());
        }
        let markdown = panic::catch_unwind(AssertUnwindSafe(|| html2md::parse_html(html)))
            .map_err(|payload| ConvertError(panic_message(payload.as_ref())))?;
        Ok(atx_headings(markdown.trim()))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "converter panicked".to_string()
    }
}

fn atx_headings(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    let mut in_fence = false;
    while i < lines.len() {
        let line = lines[i];
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push(line.to_string());
            i += 1;
            continue;
        }
        // Code blocks are copied verbatim
        let level = if in_fence {
            None
        } else {
            lines.get(i + 1).and_then(|next| setext_level(next))
        };
        match level {
            Some(level) if can_be_setext_title(line) => {
                out.push(format!("{} {}", "#".repeat(level), line.trim()));
                i += 2;
            }
            _ => {
                out.push(line.to_string());
                i += 1;
            }
        }
    }
    out.join("\n")
}

fn setext_level(line: &str) -> Option<usize> {
    let t = line.trim();
    if t.len() < 3 {
        return None;
    }
    if t.chars().all(|c| c == '=') {
        Some(1)
    } else if t.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

fn can_be_setext_title(line: &str) -> bool {
    let t = line.trim_start();
    !t.is_empty()
        && !t.starts_with('#')
        && !t.starts_with('|')
        && !t.starts_with("- ")
        && !t.starts_with("* ")
        && !t.starts_with('>')
        && !t.starts_with("```")
}
