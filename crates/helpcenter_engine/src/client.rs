use helpcenter_core::{Article, Category, Section};
use url::Url;

use crate::fetch::PageSource;
use crate::pagination::Pages;
use crate::{FailureKind, FetchError};

const PAGE_SIZE: &str = "100";

/// Help center list endpoints for one locale.
pub struct HelpCenterClient {
    source: Box<dyn PageSource>,
    base_url: Url,
    locale: String,
}

impl HelpCenterClient {
    pub fn new(source: impl PageSource + 'static, base_url: Url, locale: &str) -> Self {
        Self {
            source: Box::new(source),
            base_url,
            locale: locale.trim().to_lowercase(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn categories(&self) -> Pages<'_, Category> {
        Pages::new(
            self.source.as_ref(),
            "categories",
            self.endpoint(&["categories.json"]),
        )
    }

    pub fn sections(&self, category_id: u64) -> Pages<'_, Section> {
        let id = category_id.to_string();
        Pages::new(
            self.source.as_ref(),
            "sections",
            self.endpoint(&["categories", &id, "sections.json"]),
        )
    }

    pub fn articles(&self, section_id: u64) -> Pages<'_, Article> {
        let id = section_id.to_string();
        Pages::new(
            self.source.as_ref(),
            "articles",
            self.endpoint(&["sections", &id, "articles.json"]),
        )
    }

    /// `{base}/api/v2/help_center/{locale}/{segments..}?per_page=100`
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::new(
                    FailureKind::InvalidUrl,
                    self.base_url.as_str(),
                    "base url cannot carry a path",
                )
            })?
            .pop_if_empty()
            .extend(["api", "v2", "help_center", self.locale.as_str()])
            .extend(segments);
        url.query_pairs_mut().append_pair("per_page", PAGE_SIZE);
        Ok(url)
    }
}
