use tracing::Level;
use crate::core::domain::Configuration;

// Logs go to stderr so the menu printed on stdout stays readable.
pub fn setup_tracing(config: &Configuration) {
    if config.json_logs {
        tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_writer(std::io::stderr)
            // disable printing the name of the module in every log line.
            .with_target(false)
            .with_ansi(false)
            .without_time()
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
