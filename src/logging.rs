//! Logging initialization.
//!
//! Logging is off by default so diagnostics on stderr stay exactly what the shell
//! prints itself. Set `LSH_LOG` to a filter directive to enable it:
//! - `LSH_LOG=debug` - dispatch decisions, spawned pids, child exit statuses
//! - `LSH_LOG=warn` - only problems writing to the terminal
//!
//! Log lines go to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LSH_LOG";

/// Install the global subscriber if `LSH_LOG` is set.
pub fn init_logging() {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => return,
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();

    match result {
        Ok(()) => tracing::debug!("logging initialized"),
        Err(e) => eprintln!("lsh: failed to initialize logging: {}", e),
    }
}
