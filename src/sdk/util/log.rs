use env_logger::{Builder, Env};

// HTTP client crates log every connection at debug; keep them quiet unless asked.
const QUIET_MODULES: [&str; 3] = ["reqwest", "hyper", "hyper_util"];

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    QUIET_MODULES
        .iter()
        .fold(level.to_string(), |filter, module| format!("{},{}=warn", filter, module))
}

/// Installs the global logger. `RUST_LOG` replaces the whole default filter.
pub fn init_logging(default_level: &str) {
    Builder::from_env(Env::default().default_filter_or(default_filter(default_level)))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
