pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

/// Initialize tracing for binaries embedding this crate. Honors
/// `RUST_LOG`; defaults to debug for this crate and info elsewhere.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobflow_core=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
