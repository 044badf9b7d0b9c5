//! Command-line front ends for the help center exporter and structure generator.
pub mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use export_logging::{export_error, export_info, export_warn};
use helpcenter_core::{EntityKind, IgnoreSet};
use helpcenter_engine::{
    build_structure, write_structure, ErrorPolicy, ExportOptions, ExportSummary, Exporter,
    FetchSettings, HelpCenterClient, Html2MdConverter, HttpPageSource, Layout, ZendeskConfig,
};

use crate::cli::{CommonArgs, ExportCli, StructureCli};

/// Install loggers for the chosen verbosity and optional log file.
pub fn init_logging(common: &CommonArgs) {
    export_logging::initialize(common.verbose.log_level_filter(), common.log_file.as_deref());
}

/// Load `.env` if present, then read the Zendesk credentials.
pub fn load_config() -> Result<ZendeskConfig> {
    match dotenvy::dotenv() {
        Ok(path) => export_info!("Loaded environment from {:?}", path),
        Err(err) if err.not_found() => {}
        Err(err) => export_warn!("Ignoring unreadable .env file: {}", err),
    }
    ZendeskConfig::from_env().context("Zendesk credentials are not configured")
}

pub fn connect(config: &ZendeskConfig, locale: &str) -> Result<HelpCenterClient> {
    let base_url = config.base_url()?;
    let source = HttpPageSource::new(config, FetchSettings::default())
        .context("failed to build HTTP client")?;
    export_info!("Using help center {} ({})", base_url, locale);
    Ok(HelpCenterClient::new(source, base_url, locale))
}

/// Read the ignore file, or an empty set when none was given.
pub fn load_ignore(path: Option<&Path>) -> Result<IgnoreSet> {
    let Some(path) = path else {
        return Ok(IgnoreSet::new());
    };
    let ignore = IgnoreSet::load(path)
        .with_context(|| format!("failed to load ignore file {}", path.display()))?;
    export_info!("Loaded ignore configuration from {}", path.display());
    for kind in [EntityKind::Category, EntityKind::Section, EntityKind::Article] {
        let ids = ignore.sorted_ids(kind);
        if !ids.is_empty() {
            export_info!("Ignoring {} ids: {:?}", kind, ids);
        }
    }
    Ok(ignore)
}

pub fn export_options(cli: &ExportCli, run_date: chrono::NaiveDate) -> ExportOptions {
    ExportOptions {
        layout: if cli.no_section {
            Layout::Flat
        } else {
            Layout::Nested
        },
        error_policy: if cli.fail_fast {
            ErrorPolicy::FailFast
        } else {
            ErrorPolicy::BestEffort
        },
        ..ExportOptions::new(cli.output_dir.clone(), run_date)
    }
}

pub fn run_export(cli: &ExportCli) -> Result<ExportSummary> {
    let config = load_config()?;
    let ignore = load_ignore(cli.ignore_file.as_deref())?;
    let client = connect(&config, &cli.common.locale)?;

    let options = export_options(cli, Utc::now().date_naive());
    let exporter = Exporter::new(&client, &Html2MdConverter, &ignore, options);
    let summary = exporter.run().context("export failed")?;

    export_info!(
        "Backup complete in {:?}: {} exported, {} skipped, {} failed",
        summary.run_dir,
        summary.exported,
        summary.skipped,
        summary.failed
    );
    if summary.failed > 0 {
        export_warn!("Some articles failed; see {:?}", summary.log_path);
    }
    Ok(summary)
}

pub fn run_structure(cli: &StructureCli) -> Result<()> {
    let config = load_config()?;
    let client = connect(&config, &cli.common.locale)?;

    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    let structure = build_structure(&client, generated).context("failed to read help center")?;
    let path = write_structure(&structure, &cli.output)?;

    let articles: usize = structure
        .categories
        .iter()
        .flat_map(|c| &c.sections)
        .map(|s| s.articles.len())
        .sum();
    export_info!(
        "Wrote {} categories and {} articles to {:?}",
        structure.categories.len(),
        articles,
        path
    );
    Ok(())
}

/// Log a fatal error with its cause chain and turn it into an exit status.
pub fn exit_status<T>(result: Result<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            export_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
