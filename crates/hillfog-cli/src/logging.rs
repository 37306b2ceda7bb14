//! Tracing subscriber setup
//!
//! Logs go to stderr so command output on stdout stays machine readable.
//! `RUST_LOG` overrides the default filter.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::LogFormatArg;

const DEFAULT_FILTER: &str = "warn,hillfog=info,hillfog_cli=info,hillfog_client=info,hillfog_core=info";

pub fn init_logging(format: LogFormatArg, verbose: bool) -> Result<()> {
    let filter = build_env_filter(verbose);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormatArg::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormatArg::Compact => registry
            .with(fmt::layer().compact().without_time().with_writer(std::io::stderr))
            .try_init(),
        LogFormatArg::Pretty => registry
            .with(fmt::layer().without_time().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

fn default_directives(verbose: bool) -> String {
    if verbose {
        DEFAULT_FILTER.replace("=info", "=debug")
    } else {
        DEFAULT_FILTER.to_string()
    }
}
