//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
  ______           __   __    _
 /_  __/___ ______/ /__/ /_  (_)   _____
  / / / __ `/ ___/ //_/ __ \/ / | / / _ \
 / / / /_/ (__  ) ,< / / / / /| |/ /  __/
/_/  \__,_/____/_/|_/_/ /_/_/ |___/\___/

    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(port: u16) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://0.0.0.0:{}", port);
    info!("Health:    http://0.0.0.0:{}/health", port);
    info!("API Docs:  http://0.0.0.0:{}/swagger-ui", port);
    info!("{}", separator);
}
