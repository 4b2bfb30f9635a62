//! Tracing subscriber setup.

use std::io;

use tracing::Level;

/// Install the global subscriber. Events go to stderr so stdout only carries outcome notices.
pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
