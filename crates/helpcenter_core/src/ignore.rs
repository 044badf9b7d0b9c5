use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Which tier of the hierarchy an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Category,
    Section,
    Article,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Category => write!(f, "category"),
            EntityKind::Section => write!(f, "section"),
            EntityKind::Article => write!(f, "article"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IgnoreFileError {
    #[error("failed to read ignore file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse ignore file: {0}")]
    Parse(#[from] json5::Error),
}

/// User supplied ids to leave out of an export.
///
/// The three tiers are independent: ignoring a category does not add its
/// sections or articles here. Callers decide whether to descend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    categories: HashSet<u64>,
    sections: HashSet<u64>,
    articles: HashSet<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct IgnoreFile {
    #[serde(default)]
    category: Vec<IgnoreEntry>,
    #[serde(default)]
    section: Vec<IgnoreEntry>,
    #[serde(default)]
    article: Vec<IgnoreEntry>,
}

#[derive(Debug, Deserialize)]
struct IgnoreEntry {
    id: u64,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON5 document of the form
    /// `{ category: [{ id: 1 }], section: [...], article: [...] }`.
    pub fn from_json5_str(input: &str) -> Result<Self, IgnoreFileError> {
        let file: IgnoreFile = json5::from_str(input)?;
        let ids = |entries: Vec<IgnoreEntry>| entries.into_iter().map(|e| e.id).collect();
        Ok(Self {
            categories: ids(file.category),
            sections: ids(file.section),
            articles: ids(file.article),
        })
    }

    pub fn load(path: &Path) -> Result<Self, IgnoreFileError> {
        let content = fs::read_to_string(path).map_err(|source| IgnoreFileError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json5_str(&content)
    }

    pub fn insert(&mut self, kind: EntityKind, id: u64) -> bool {
        self.ids_mut(kind).insert(id)
    }

    pub fn is_ignored(&self, kind: EntityKind, id: u64) -> bool {
        self.ids(kind).contains(&id)
    }

    /// Ignored ids of one tier in ascending order, for reporting.
    pub fn sorted_ids(&self, kind: EntityKind) -> Vec<u64> {
        let mut ids: Vec<u64> = self.ids(kind).iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.sections.is_empty() && self.articles.is_empty()
    }

    fn ids(&self, kind: EntityKind) -> &HashSet<u64> {
        match kind {
            EntityKind::Category => &self.categories,
            EntityKind::Section => &self.sections,
            EntityKind::Article => &self.articles,
        }
    }

    fn ids_mut(&mut self, kind: EntityKind) -> &mut HashSet<u64> {
        match kind {
            EntityKind::Category => &mut self.categories,
            EntityKind::Section => &mut self.sections,
            EntityKind::Article => &mut self.articles,
        }
    }
}
