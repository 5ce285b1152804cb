//! Diagnostic logging for the `rio` binary.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber filtered by `RIO_LOG`
/// (falling back to `RUST_LOG`), e.g. `RIO_LOG=rio_types=trace`.
///
/// Does nothing when neither variable is set. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let Some(directives) = std::env::var("RIO_LOG")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
        else {
            return;
        };
        let layer = tracing_tree::HierarchicalLayer::new(2)
            .with_targets(true)
            .with_writer(std::io::stderr);
        // Ignore a subscriber installed by an embedding host.
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new(directives))
            .with(layer)
            .try_init();
    });
}
