use std::io;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

/// Log to stderr so command output on stdout stays clean.
///
/// Our own crates log at INFO (DEBUG with `--verbose`); everything else only
/// shows warnings.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = filter::Targets::new()
        .with_target("dance_calendar", level)
        .with_target("dance_calendar_core", level)
        .with_default(Level::WARN);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}
