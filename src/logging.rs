use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber, logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise zimbib crates log at `info`, or at
/// `debug` with `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "zimbib=debug" } else { "zimbib=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
