use std::io;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the default filter. Logs go to stderr so `list` output
/// on stdout stays machine readable.
pub fn init(json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
