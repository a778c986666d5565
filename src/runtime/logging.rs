use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Install the global subscriber. `RUST_LOG` wins over `log.level`.
///
/// Logs go to stderr so previews on stdout can be piped.
pub fn init(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
