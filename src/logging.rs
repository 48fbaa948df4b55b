/// Initialize structured logging with tracing.
///
/// Safe to call more than once: the first subscriber wins and later calls are
/// no-ops, so tests and the CLI can both call it.
pub fn init_logging() {
    init_logging_with("info");
}

/// Same as [`init_logging`] but with an explicit fallback filter, used when
/// `RUST_LOG` is not set.
pub fn init_logging_with(default_filter: &str) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .json(),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Structured logging initialized");
    }
}
