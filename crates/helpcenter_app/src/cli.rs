use std::path::PathBuf;

use clap::{Args, Parser};
use clap_verbosity_flag::{InfoLevel, Verbosity};

pub const DEFAULT_LOCALE: &str = "en-us";
pub const DEFAULT_OUTPUT_DIR: &str = "backups_md";
pub const DEFAULT_STRUCTURE_FILE: &str = "zendesk_structure.json";

/// Flags shared by both binaries.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Help center locale to read, e.g. en-us or ja.
    #[arg(long = "lang", value_name = "LOCALE", default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Also write log output to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

/// Back up Zendesk Help Center articles as Markdown files.
///
/// Credentials come from ZENDESK_USER, ZENDESK_TOKEN and ZENDESK_DOMAIN,
/// read from the environment or a .env file in the working directory.
#[derive(Debug, Parser)]
#[command(name = "helpcenter-export", version, about, long_about = None)]
pub struct ExportCli {
    /// Write articles directly under their category, without section folders.
    #[arg(long)]
    pub no_section: bool,

    /// JSON5 file listing category, section and article ids to skip.
    #[arg(long, value_name = "PATH")]
    pub ignore_file: Option<PathBuf>,

    /// Root directory for dated backups.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Stop at the first article that fails to convert or write.
    #[arg(long)]
    pub fail_fast: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Dump the category/section/article tree of a Zendesk Help Center as JSON.
#[derive(Debug, Parser)]
#[command(name = "helpcenter-structure", version, about, long_about = None)]
pub struct StructureCli {
    /// Destination JSON file.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_STRUCTURE_FILE)]
    pub output: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}
