use lazy_static::lazy_static;

use crate::constants::*;

lazy_static! {
    pub static ref APP_CONFIG: AppConfig = AppConfig::from_env();
}

/// Which `Catalog` implementation backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

/// Application settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub mongodb_uri: Option<String>,
    pub mongodb_min_pool: u32,
    pub mongodb_max_pool: u32,
    pub aws_bucket: String,
    pub app_env: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT").unwrap_or_default();
        let port = port.parse::<u16>().unwrap_or(DEFAULT_PORT);
        let store_backend = std::env::var("CATALOG_STORE").unwrap_or_default();
        let store_backend = match store_backend.to_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            _ => StoreBackend::Mongo,
        };
        let mongodb_uri = std::env::var("MONGODB_URI").ok();
        let min_pool = std::env::var("MONGODB_MIN_POOL_SIZE").unwrap_or_default();
        let max_pool = std::env::var("MONGODB_MAX_POOL_SIZE").unwrap_or_default();
        let aws_bucket = std::env::var("AWS_BUCKET").unwrap_or(AWS_BUCKET.to_owned());
        let app_env = std::env::var("APP_ENV").unwrap_or("production".to_owned());
        Self {
            port,
            store_backend,
            mongodb_uri,
            mongodb_min_pool: min_pool.parse::<u32>().unwrap_or(MONGO_MIN_POOL_SIZE),
            mongodb_max_pool: max_pool.parse::<u32>().unwrap_or(MONGO_MAX_POOL_SIZE),
            aws_bucket,
            app_env,
        }
    }

    /// Internal error details are only sent back to the caller in development
    pub fn expose_error_details(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expose_error_details() {
        let mut config = AppConfig::from_env();
        config.app_env = "production".to_owned();
        assert_eq!(config.expose_error_details(), false);
        config.app_env = "Development".to_owned();
        assert_eq!(config.expose_error_details(), true);
    }
}
