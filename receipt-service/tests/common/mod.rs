//! Shared helpers for integration tests.

use receipt_service::config::{Config, ServerConfig};
use receipt_service::startup::Application;

/// Boot the application on an ephemeral port with an empty store and return
/// its base URL.
pub async fn spawn_app() -> String {
    spawn_app_with_seed(false).await
}

/// Boot the application with the demo data set loaded.
pub async fn spawn_app_with_seed(seed_demo_data: bool) -> String {
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        seed_demo_data,
        service_name: "receipt-service".to_string(),
    };

    let application = Application::build(config)
        .await
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", application.port());

    tokio::spawn(application.run_until_stopped());

    address
}
