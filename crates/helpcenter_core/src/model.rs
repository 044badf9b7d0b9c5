use serde::{Deserialize, Deserializer};

/// Top level of the help center hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    pub id: u64,
    pub name: String,
    pub category_id: u64,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// A single help center article as returned by the list endpoints.
///
/// `body` is HTML and may be null for articles without content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Article {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub section_id: u64,
    #[serde(default)]
    pub locale: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub label_names: Vec<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Drafts are exported like published articles.
    #[serde(default)]
    pub draft: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
