use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use export_logging::{export_error, export_info, export_warn};
use helpcenter_core::{
    sanitize_name, Article, Category, EntityKind, ExportRecord, ExportStatus, IgnoreSet, Section,
};

use crate::client::HelpCenterClient;
use crate::convert::{ConvertError, Converter};
use crate::frontmatter::{write_article, WriteError, MISSING_URL};
use crate::run_log::{write_run_log, RunLogError};
use crate::FetchError;

pub const DEFAULT_LOG_FILENAME: &str = "_log.csv";

/// Directory shape below the category level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `{category}/{section}/{article}.md`
    #[default]
    Nested,
    /// `{category}/{article}.md`
    Flat,
}

/// What to do when one article fails to convert or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Record an `error` row and move on.
    #[default]
    BestEffort,
    /// Write the log gathered so far and abort the run.
    FailFast,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_root: PathBuf,
    pub run_date: NaiveDate,
    pub layout: Layout,
    pub error_policy: ErrorPolicy,
    pub log_filename: String,
}

impl ExportOptions {
    pub fn new(output_root: impl Into<PathBuf>, run_date: NaiveDate) -> Self {
        Self {
            output_root: output_root.into(),
            run_date,
            layout: Layout::default(),
            error_policy: ErrorPolicy::default(),
            log_filename: DEFAULT_LOG_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub run_dir: PathBuf,
    pub log_path: PathBuf,
    pub records: Vec<ExportRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("authentication failed: {0}")]
    Authentication(#[source] FetchError),
    #[error("failed to fetch {what}: {source}")]
    Fetch {
        what: String,
        #[source]
        source: FetchError,
    },
    #[error("article {article_id} failed: {source}")]
    Article {
        article_id: u64,
        #[source]
        source: ArticleError,
    },
    #[error("failed to write run log: {0}")]
    RunLog(#[from] RunLogError),
}

impl ExportError {
    pub(crate) fn from_fetch(what: impl Into<String>, source: FetchError) -> Self {
        if source.is_unauthorized() {
            ExportError::Authentication(source)
        } else {
            ExportError::Fetch {
                what: what.into(),
                source,
            }
        }
    }
}

/// Walks categories, sections and articles of one locale and writes each
/// article as Markdown.
///
/// Ignore checks happen independently at every tier. Sections of an ignored
/// category and articles of an ignored section are never fetched, so they
/// leave no trace in the run log. Ignored articles are logged as skipped.
pub struct Exporter<'a> {
    client: &'a HelpCenterClient,
    converter: &'a dyn Converter,
    ignore: &'a IgnoreSet,
    options: ExportOptions,
}

struct RunState {
    run_dir: PathBuf,
    records: Vec<ExportRecord>,
    claimed: HashSet<PathBuf>,
}

impl RunState {
    fn new(run_dir: PathBuf) -> Self {
        Self {
            run_dir,
            records: Vec::new(),
            claimed: HashSet::new(),
        }
    }

    /// First free `{stem}.md`, `{stem}_1.md`, ... in `dir` for this run.
    fn claim_file_name(&mut self, dir: &Path, stem: &str) -> String {
        let mut candidate = format!("{stem}.md");
        let mut counter = 1;
        while !self.claimed.insert(dir.join(&candidate)) {
            candidate = format!("{stem}_{counter}.md");
            counter += 1;
        }
        candidate
    }

    fn count(&self, status: ExportStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }
}

impl<'a> Exporter<'a> {
    pub fn new(
        client: &'a HelpCenterClient,
        converter: &'a dyn Converter,
        ignore: &'a IgnoreSet,
        options: ExportOptions,
    ) -> Self {
        Self {
            client,
            converter,
            ignore,
            options,
        }
    }

    /// `{output_root}/{run_date}/{locale}`
    pub fn run_dir(&self) -> PathBuf {
        self.options
            .output_root
            .join(self.options.run_date.format("%Y-%m-%d").to_string())
            .join(self.client.locale())
    }

    pub fn run(&self) -> Result<ExportSummary, ExportError> {
        let categories: Vec<Category> = self
            .client
            .categories()
            .collect::<Result<_, _>>()
            .map_err(|err| ExportError::from_fetch("categories", err))?;
        export_info!("Fetched {} categories", categories.len());

        let mut state = RunState::new(self.run_dir());
        for category in &categories {
            if self.ignore.is_ignored(EntityKind::Category, category.id) {
                export_info!("Ignoring category {} ({})", category.id, category.name);
                continue;
            }
            if let Err(err) = self.export_category(&mut state, category) {
                if matches!(err, ExportError::Article { .. }) {
                    self.finish(&state)?;
                }
                return Err(err);
            }
        }
        self.finish(&state)
    }

    fn export_category(&self, state: &mut RunState, category: &Category) -> Result<(), ExportError> {
        let sections: Vec<Section> = self
            .client
            .sections(category.id)
            .collect::<Result<_, _>>()
            .map_err(|err| {
                ExportError::from_fetch(format!("sections of category {}", category.id), err)
            })?;
        export_info!(
            "Category '{}': {} sections",
            category.name,
            sections.len()
        );

        for section in &sections {
            if self.ignore.is_ignored(EntityKind::Section, section.id) {
                export_info!("Ignoring section {} ({})", section.id, section.name);
                continue;
            }
            let articles: Vec<Article> = self
                .client
                .articles(section.id)
                .collect::<Result<_, _>>()
                .map_err(|err| {
                    ExportError::from_fetch(format!("articles of section {}", section.id), err)
                })?;
            for article in &articles {
                self.export_article(state, category, section, article)?;
            }
        }
        Ok(())
    }

    fn export_article(
        &self,
        state: &mut RunState,
        category: &Category,
        section: &Section,
        article: &Article,
    ) -> Result<(), ExportError> {
        let mut record = ExportRecord {
            article_id: article.id,
            title: article.title.clone(),
            status: ExportStatus::Skipped,
            category: category.name.clone(),
            section: section.name.clone(),
            path: String::new(),
            source_url: article
                .html_url
                .clone()
                .unwrap_or_else(|| MISSING_URL.to_string()),
            detail: String::new(),
        };

        if self.ignore.is_ignored(EntityKind::Article, article.id) {
            export_info!("Ignoring article {} ({})", article.id, article.title);
            record.detail = "ignored".into();
            state.records.push(record);
            return Ok(());
        }
        let Some(html) = article.body.as_deref() else {
            export_warn!("Article {} has no body, skipping", article.id);
            record.detail = "no body".into();
            state.records.push(record);
            return Ok(());
        };

        let mut segments = vec![sanitize_name(&category.name)];
        if self.options.layout == Layout::Nested {
            segments.push(sanitize_name(&section.name));
        }
        let dir = segments
            .iter()
            .fold(state.run_dir.clone(), |dir, segment| dir.join(segment));
        let file_name = state.claim_file_name(&dir, &sanitize_name(&article.title));

        let outcome = self
            .converter
            .to_markdown(html)
            .map_err(ArticleError::from)
            .and_then(|body| {
                write_article(&dir, &file_name, article, &category.name, &section.name, &body)
                    .map_err(ArticleError::from)
            });

        match outcome {
            Ok(_) => {
                segments.push(file_name);
                record.path = segments.join("/");
                record.status = ExportStatus::Exported;
                export_info!("Exported {}", record.path);
                state.records.push(record);
                Ok(())
            }
            Err(err) => {
                export_error!("Article {} ('{}') failed: {}", article.id, article.title, err);
                record.status = ExportStatus::Error;
                record.detail = err.to_string();
                state.records.push(record);
                match self.options.error_policy {
                    ErrorPolicy::BestEffort => Ok(()),
                    ErrorPolicy::FailFast => Err(ExportError::Article {
                        article_id: article.id,
                        source: err,
                    }),
                }
            }
        }
    }

    fn finish(&self, state: &RunState) -> Result<ExportSummary, ExportError> {
        let log_path = write_run_log(&state.run_dir, &self.options.log_filename, &state.records)?;
        let summary = ExportSummary {
            exported: state.count(ExportStatus::Exported),
            skipped: state.count(ExportStatus::Skipped),
            failed: state.count(ExportStatus::Error),
            run_dir: state.run_dir.clone(),
            log_path,
            records: state.records.clone(),
        };
        export_info!(
            "Run log written to {:?} ({} exported, {} skipped, {} failed)",
            summary.log_path,
            summary.exported,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }
}
