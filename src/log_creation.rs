//! Sets up the diagnostics channel of the tool.
//!
//! Found addresses go to stdout, everything else (progress, skipped pages, failures) is
//! emitted through `tracing` and lands on stderr so the output stays pipeable.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "harvester=debug,info"
    } else {
        "harvester=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // a subscriber may already be installed
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .try_init();
}
