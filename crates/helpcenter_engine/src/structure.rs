use std::path::{Path, PathBuf};

use export_logging::export_info;
use helpcenter_core::{Article, Category, Section};
use serde::{Deserialize, Serialize};

use crate::client::HelpCenterClient;
use crate::persist::{write_file_atomic, PersistError};
use crate::FetchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpCenterStructure {
    pub language: String,
    pub generation_date: String,
    pub categories: Vec<CategoryNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: u64,
    pub name: String,
    pub html_url: Option<String>,
    pub sections: Vec<SectionNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionNode {
    pub id: u64,
    pub name: String,
    pub html_url: Option<String>,
    pub articles: Vec<ArticleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleEntry {
    pub id: u64,
    pub title: String,
    pub html_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    #[error("authentication failed: {0}")]
    Authentication(#[source] FetchError),
    #[error("failed to fetch {what}: {source}")]
    Fetch {
        what: String,
        #[source]
        source: FetchError,
    },
    #[error("failed to serialize structure: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write structure file: {0}")]
    Persist(#[from] PersistError),
}

fn fetch_failed(what: impl Into<String>, source: FetchError) -> StructureError {
    if source.is_unauthorized() {
        StructureError::Authentication(source)
    } else {
        StructureError::Fetch {
            what: what.into(),
            source,
        }
    }
}

/// Fetch the full category/section/article tree of the client's locale.
///
/// No ignore list applies here and article bodies are dropped; the output is
/// meant for discovering ids.
pub fn build_structure(
    client: &HelpCenterClient,
    generation_date: impl Into<String>,
) -> Result<HelpCenterStructure, StructureError> {
    let categories: Vec<Category> = client
        .categories()
        .collect::<Result<_, _>>()
        .map_err(|err| fetch_failed("categories", err))?;
    export_info!("Fetched {} categories", categories.len());

    let mut nodes = Vec::with_capacity(categories.len());
    for category in categories {
        let sections: Vec<Section> = client
            .sections(category.id)
            .collect::<Result<_, _>>()
            .map_err(|err| fetch_failed(format!("sections of category {}", category.id), err))?;

        let mut section_nodes = Vec::with_capacity(sections.len());
        for section in sections {
            let articles: Vec<Article> = client
                .articles(section.id)
                .collect::<Result<_, _>>()
                .map_err(|err| fetch_failed(format!("articles of section {}", section.id), err))?;
            export_info!(
                "{} / {}: {} articles",
                category.name,
                section.name,
                articles.len()
            );
            section_nodes.push(SectionNode {
                id: section.id,
                name: section.name,
                html_url: section.html_url,
                articles: articles
                    .into_iter()
                    .map(|a| ArticleEntry {
                        id: a.id,
                        title: a.title,
                        html_url: a.html_url,
                    })
                    .collect(),
            });
        }

        nodes.push(CategoryNode {
            id: category.id,
            name: category.name,
            html_url: category.html_url,
            sections: section_nodes,
        });
    }

    Ok(HelpCenterStructure {
        language: client.locale().to_string(),
        generation_date: generation_date.into(),
        categories: nodes,
    })
}

/// Pretty-print the tree as JSON and write it atomically to `path`.
pub fn write_structure(
    structure: &HelpCenterStructure,
    path: &Path,
) -> Result<PathBuf, StructureError> {
    let mut json = serde_json::to_string_pretty(structure)?;
    json.push('\n');
    Ok(write_file_atomic(path, json)?)
}
