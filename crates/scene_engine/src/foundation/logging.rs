//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from the `RUST_LOG` environment variable
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    if env_logger::try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Initialize the logging system with an explicit filter string (`"info"`, `"scene_engine=debug"`, ...)
///
/// `RUST_LOG` still wins when it is set.
pub fn init_with_filter(filter: &str) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    builder.try_init()
}
