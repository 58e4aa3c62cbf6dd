use actionrouter::cli::{run_cli, Cli};
use actionrouter::logging::{init_logging_with_config, LogConfig};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if std::env::var_os("ACTR_LOG_LEVEL").is_none() {
        // Keep command output readable unless asked otherwise
        log_config.log_level = "warn".to_string();
    }
    if let Err(err) = init_logging_with_config(&log_config) {
        eprintln!("Warning: {err:#}");
    }

    match run_cli(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
