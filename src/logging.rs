use tracing_subscriber::{fmt, EnvFilter};

/// Log to stderr so stdout stays clean for the solution.
///
/// Honors `RUST_LOG`, defaulting to `postman=info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("postman=info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
