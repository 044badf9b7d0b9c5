//! Help center engine: API access, conversion and file output for the
//! exporter and the structure generator.
mod client;
mod config;
mod convert;
mod export;
mod fetch;
mod frontmatter;
mod pagination;
mod persist;
mod run_log;
mod structure;
mod types;

pub use client::HelpCenterClient;
pub use config::{ConfigError, ZendeskConfig, DOMAIN_VAR, TOKEN_VAR, USER_VAR};
pub use convert::{ConvertError, Converter, Html2MdConverter};
pub use export::{
    ArticleError, ErrorPolicy, ExportError, ExportOptions, ExportSummary, Exporter, Layout,
    DEFAULT_LOG_FILENAME,
};
pub use fetch::{FetchSettings, HttpPageSource, PageSource};
pub use frontmatter::{build_article_document, write_article, WriteError, MISSING_URL};
pub use pagination::Pages;
pub use persist::{ensure_output_dir, write_file_atomic, AtomicFileWriter, PersistError};
pub use run_log::{render_run_log, write_run_log, RunLogError, LOG_HEADER};
pub use structure::{
    build_structure, write_structure, ArticleEntry, CategoryNode, HelpCenterStructure,
    SectionNode, StructureError,
};
pub use types::{FailureKind, FetchError};
