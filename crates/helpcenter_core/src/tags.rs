use once_cell::sync::Lazy;
use regex::Regex;

// "Error 404", "error: 0x80070005", "ERR-1234", "code E1001", "Error #12"
static PREFIXED_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:error|err|code)\b[\s:#-]*((?:0x[0-9a-f]{4,8})|(?:[a-z]{1,3}-?)?\d{2,6})\b")
        .expect("static regex")
});

// Bracketed codes such as "[E1001]" or "(ERR-42)"
static BRACKETED_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\[(]((?:E|ERR)-?\d{2,6})[\])]").expect("static regex")
});

/// Error codes mentioned in an article title, in order of appearance.
///
/// The leading keyword is dropped and the code keeps its spelling, so
/// `Error 404` yields `404`, `ERR-1234` yields `1234` and `[E1001]` yields
/// `E1001`.
pub fn error_code_tags(title: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = PREFIXED_CODE
        .captures_iter(title)
        .chain(BRACKETED_CODE.captures_iter(title))
        .filter_map(|caps| caps.get(1))
        .map(|m| (m.start(), m.as_str().to_string()))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);

    let mut tags: Vec<String> = Vec::with_capacity(found.len());
    for (_, code) in found {
        if !tags.contains(&code) {
            tags.push(code);
        }
    }
    tags
}

/// Native labels followed by title-derived error codes, de-duplicated in
/// first-seen order.
pub fn merge_tags(labels: &[String], title: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(labels.len());
    for tag in labels.iter().cloned().chain(error_code_tags(title)) {
        if !tag.trim().is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_titles_have_no_codes() {
        assert!(error_code_tags("How to reset your password").is_empty());
        assert!(error_code_tags("Top 10 tips for 2024").is_empty());
    }

    #[test]
    fn http_style_error() {
        assert_eq!(error_code_tags("Error 404: Page missing"), vec!["404"]);
    }

    #[test]
    fn prefixed_and_hex_codes() {
        assert_eq!(error_code_tags("Fixing ERR-1234 on login"), vec!["1234"]);
        assert_eq!(error_code_tags("error code E1001 during sync"), vec!["E1001"]);
        assert_eq!(
            error_code_tags("Install fails with error 0x80070005"),
            vec!["0x80070005"]
        );
    }

    #[test]
    fn bracketed_codes() {
        assert_eq!(error_code_tags("Sync stuck [E1001]"), vec!["E1001"]);
    }

    #[test]
    fn repeated_codes_are_reported_once() {
        assert_eq!(error_code_tags("Error 500 (error 500 again)"), vec!["500"]);
    }

    #[test]
    fn merge_keeps_labels_first_and_dedupes() {
        let labels = vec!["billing".to_string(), "404".to_string()];
        assert_eq!(
            merge_tags(&labels, "Error 404 and Error 502"),
            vec!["billing", "404", "502"]
        );
    }
}
