pub mod build_info;

use std::{env, path::PathBuf, sync::Once};

const DEFAULT_DIR_NAME: &str = "budget_wise";
pub const HOME_ENV: &str = "BUDGET_WISE_HOME";
pub const TODAY_ENV: &str = "BUDGET_WISE_TODAY";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, writing to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "budget_wise=info".parse() {
            filter = filter.add_directive(directive);
        }

        match fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            Ok(()) => tracing::info!("Budget Wise tracing initialized."),
            Err(err) => eprintln!("tracing already configured: {err}"),
        }
    });
}

/// Returns the application base directory, honouring `BUDGET_WISE_HOME`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env_override() {
        return custom;
    }
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// The `BUDGET_WISE_HOME` override, when set and non-empty.
pub fn env_override() -> Option<PathBuf> {
    env::var_os(HOME_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
