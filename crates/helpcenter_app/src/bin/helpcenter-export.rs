use std::process::ExitCode;

use clap::Parser;
use helpcenter_app::cli::ExportCli;

fn main() -> ExitCode {
    let cli = ExportCli::parse();
    helpcenter_app::init_logging(&cli.common);
    helpcenter_app::exit_status(helpcenter_app::run_export(&cli))
}
