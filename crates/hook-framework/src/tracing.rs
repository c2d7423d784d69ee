//! # Observability
//!
//! Structured logging for the host and every plugin loaded into it.
//!
//! ```bash
//! RUST_LOG=info cargo run -p bootstrap-demo     # phase and registration events
//! RUST_LOG=debug cargo run -p bootstrap-demo    # every handler and binding
//! ```

/// Initializes the global `tracing` subscriber.
///
/// Filtering follows `RUST_LOG`. Calling it a second time is harmless; the
/// first subscriber stays installed.
pub fn setup_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
    if installed.is_err() {
        ::tracing::debug!("Tracing subscriber already installed");
    }
}
