/// Upper bound, in characters, for a single sanitized path segment.
pub const MAX_NAME_LEN: usize = 100;

const EMPTY_INPUT: &str = "Unnamed";
const NOTHING_LEFT: &str = "Sanitized_Content";

/// Map an arbitrary title or name to a single filesystem-safe path segment.
///
/// Deterministic and idempotent. Distinct inputs may map to the same output.
pub fn sanitize_name(input: &str) -> String {
    if input.trim().is_empty() {
        return EMPTY_INPUT.to_string();
    }

    let mut compacted = String::with_capacity(input.len());
    let mut prev: Option<char> = None;
    for c in input.chars() {
        let mapped = match c {
            '"' => '\'',
            c if c.is_whitespace() => ' ',
            c if is_forbidden(c) => '_',
            c => c,
        };
        // Collapse runs of spaces and of underscores
        if (mapped == ' ' || mapped == '_') && prev == Some(mapped) {
            continue;
        }
        compacted.push(mapped);
        prev = Some(mapped);
    }

    let mut name = trim_edges(&compacted).to_string();
    if name.chars().count() > MAX_NAME_LEN {
        let cut: String = name.chars().take(MAX_NAME_LEN).collect();
        name = trim_edges(&cut).to_string();
    }
    if name.is_empty() {
        return NOTHING_LEFT.to_string();
    }
    if is_reserved_windows_name(&name) {
        name.push('_');
    }
    name
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(&['_', ' ', '.'][..])
}

fn is_forbidden(c: char) -> bool {
    c.is_control() || matches!(c, '\\' | '/' | ':' | '*' | '?' | '<' | '>' | '|')
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
