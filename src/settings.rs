use std::env;

use serde::Deserialize;
use tracing::info;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub env: String, // file / server
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_exp: u16,
    pub jwt_refresh_exp: u16,
    pub redis_url: String,
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
    #[serde(default = "default_storage_public_url")]
    pub storage_public_url: String,
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_storage_dir() -> String {
    "./storage".to_string()
}

fn default_storage_public_url() -> String {
    "http://localhost:8000/storage".to_string()
}

fn default_max_upload_size() -> usize {
    5 * 1024 * 1024
}

pub fn get_config() -> anyhow::Result<Config> {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("using .env file as environment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environment as environment variable");
    }
    Ok(envy::from_env::<Config>()?)
}
