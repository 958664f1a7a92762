//! simplebench CLI entry point

use simplebench::config::cli::Cli;
use simplebench::config::toml::load_config;
use simplebench::coordinator::{exit_code, run_benchmark, EXIT_CONFIG};
use simplebench::output::emit_report;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    println!("simplebench v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    println!("{}", config);
    println!();

    let result = run_benchmark(config.clone());
    let code = exit_code(&result);

    match result {
        Ok(report) => emit_report(&config, &report.summary),
        Err(e) => error!("{}", e),
    }

    ExitCode::from(code)
}

/// Log to stderr so the report on stdout stays clean
///
/// `-v` raises the level to debug, `-vv` to trace; `RUST_LOG` overrides both.
fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("simplebench={}", level)));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .init();
}
