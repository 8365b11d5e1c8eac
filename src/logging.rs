//! Logging setup
//!
//! JSON lines on stderr so they never mix with panels printed on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log directive for the crate
///
/// `quiet` keeps only errors; otherwise info and above. `RUST_LOG` can
/// still widen or narrow other targets.
pub fn log_directive(quiet: bool) -> &'static str {
    if quiet {
        "deskdash=error"
    } else {
        "deskdash=info"
    }
}

/// Initialize logging with optional quiet mode.
///
/// Can only be called once per process.
pub fn init_logging(quiet: bool) {
    let filter = match log_directive(quiet).parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}
