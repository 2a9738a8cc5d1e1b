//! Logging facade.
//!
//! With the `tracing` feature the crate emits structured events whose
//! `message` field names the area and what happened (`gesture.transition`,
//! `gesture.timer`, `gesture.fling`, ...). Without it every logging call
//! compiles away.
//!
//! The `tracing-json` feature adds [`init_json_logging`], which installs a
//! JSON subscriber filtered by `RUST_LOG` (default `info`).

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a global JSON subscriber honoring `RUST_LOG`.
///
/// Fails if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
}
