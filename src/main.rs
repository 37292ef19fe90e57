//! NameLens - audit file and folder naming conventions against declarative rules
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use namelens::cli::{output, Cli};
use namelens::{exit_codes, scanner};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    let diagnostics = match scanner::scan(&cli.path).await {
        Ok(diagnostics) => diagnostics,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    if cli.json {
        match output::render_json(&diagnostics) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(exit_codes::RUNTIME_ERROR);
            }
        }
    } else {
        print!("{}", output::render_text(&diagnostics));
    }

    // Exit codes for CI integration
    std::process::exit(output::exit_code(&diagnostics));
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
