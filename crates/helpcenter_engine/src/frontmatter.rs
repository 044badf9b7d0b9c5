use std::path::{Path, PathBuf};

use helpcenter_core::{merge_tags, Article};
use serde::Serialize;

use crate::persist::{AtomicFileWriter, PersistError};

pub const MISSING_URL: &str = "URL_Not_Available";

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to render frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Serialize)]
struct Frontmatter<'a> {
    title: &'a str,
    article_id: u64,
    source_url: &'a str,
    category: &'a str,
    section: &'a str,
    tags: Vec<String>,
    created_at: &'a str,
    updated_at: &'a str,
}

/// Render the full Markdown file for an article: YAML frontmatter, a blank
/// line, the title as an H1, then the converted body.
pub fn build_article_document(
    article: &Article,
    category: &str,
    section: &str,
    body_markdown: &str,
) -> Result<String, serde_yaml::Error> {
    let frontmatter = Frontmatter {
        title: &article.title,
        article_id: article.id,
        source_url: article.html_url.as_deref().unwrap_or(MISSING_URL),
        category,
        section,
        tags: merge_tags(&article.label_names, &article.title),
        created_at: article.created_at.as_deref().unwrap_or_default(),
        updated_at: article.updated_at.as_deref().unwrap_or_default(),
    };
    let yaml = serde_yaml::to_string(&frontmatter)?;

    let mut doc = String::with_capacity(yaml.len() + body_markdown.len() + article.title.len() + 16);
    doc.push_str("---\n");
    doc.push_str(&yaml);
    doc.push_str("---\n\n# ");
    // One line, whatever whitespace the title carries
    doc.push_str(&article.title.split_whitespace().collect::<Vec<_>>().join(" "));
    doc.push_str("\n\n");
    let body = body_markdown.trim();
    if !body.is_empty() {
        doc.push_str(body);
        doc.push('\n');
    }
    Ok(doc)
}

/// Render and write `{dir}/{file_name}`, creating `dir` if needed.
pub fn write_article(
    dir: &Path,
    file_name: &str,
    article: &Article,
    category: &str,
    section: &str,
    body_markdown: &str,
) -> Result<PathBuf, WriteError> {
    let doc = build_article_document(article, category, section, body_markdown)?;
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    Ok(writer.write(file_name, doc)?)
}
