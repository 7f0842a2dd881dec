//! Command implementations behind the `stock-*` binaries.

pub mod check_cmd;
pub mod report_cmd;

use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber for a command invocation.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` raises the default level
/// from `warn` to `debug`.
pub(crate) fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
