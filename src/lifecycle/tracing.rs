/// Initializes the tracing/logging infrastructure for the application.
///
/// Log levels come from the `RUST_LOG` environment variable:
/// - `RUST_LOG=info` - actor start/stop and one line per command outcome
/// - `RUST_LOG=debug` - adds payloads and dispatch decisions
/// - `RUST_LOG=venue_order_manager=debug` - debug only for this crate
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Venue started");
/// ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
