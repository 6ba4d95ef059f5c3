use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub seed_demo_data: bool,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env::var("RECEIPT_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        // Port 0 asks the OS for an ephemeral port; integration tests rely on it.
        let port = env::var("RECEIPT_SERVICE_PORT")
            .unwrap_or_else(|_| "3007".to_string())
            .parse()?;

        let seed_demo_data = env::var("RECEIPT_SEED_DEMO_DATA")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Self {
            server: ServerConfig { host, port },
            seed_demo_data,
            service_name: "receipt-service".to_string(),
        })
    }
}
