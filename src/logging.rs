use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes logging to stderr, keeping stdout free for table output.
pub fn init_logging() {
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("enroll_clean=info".parse().unwrap()))
        .with(console_layer)
        .init();
}
