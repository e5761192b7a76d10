/// Logging setup for host applications
///
/// Log output goes to stderr and is filtered to this crate at the requested
/// level ("error", "warn", "info", "debug" or "trace").

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber
///
/// Returns false when a subscriber was already installed (for example by the
/// host application or an earlier call); that is not an error.
pub fn init_logging(level: &str) -> bool {
    let level = match level.trim().to_ascii_lowercase().as_str() {
        l @ ("error" | "warn" | "info" | "debug" | "trace") => l.to_string(),
        _ => "warn".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("plant_baby={}", level)))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
