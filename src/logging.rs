//! Tracing subscriber setup for the kai binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job.

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "kai=info";

/// Initialize the global tracing subscriber with stderr output.
///
/// `RUST_LOG` takes precedence over `level`. Stdout stays reserved for
/// decoded content.
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // No-op if a global subscriber is already set
    let _ = subscriber.try_init();
}
