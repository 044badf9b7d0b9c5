//! Help center core: data model and pure helpers shared by the exporter and
//! the structure generator. Nothing in this crate touches the network.
mod ignore;
mod model;
mod record;
mod sanitize;
mod tags;

pub use ignore::{EntityKind, IgnoreFileError, IgnoreSet};
pub use model::{Article, Category, Section};
pub use record::{ExportRecord, ExportStatus};
pub use sanitize::{sanitize_name, MAX_NAME_LEN};
pub use tags::{error_code_tags, merge_tags};
