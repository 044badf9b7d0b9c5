use std::process::ExitCode;

use clap::Parser;
use helpcenter_app::cli::StructureCli;

fn main() -> ExitCode {
    let cli = StructureCli::parse();
    helpcenter_app::init_logging(&cli.common);
    helpcenter_app::exit_status(helpcenter_app::run_structure(&cli))
}
