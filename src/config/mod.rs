use std::env;

use lazy_static::lazy_static;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    /// Upper bound applied to the `per_page` query parameter.
    pub max_items_per_page: u64,
    /// Page size used when a list request carries no `per_page`.
    pub default_items_per_page: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid number"),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME").unwrap_or_else(|_| "nobix".to_string()),
            max_items_per_page: env::var("MAX_ITEMS_PER_PAGE")
                .unwrap_or_else(|_| MAX_PAGE_SIZE.to_string())
                .parse()
                .expect("MAX_ITEMS_PER_PAGE must be a valid number"),
            default_items_per_page: env::var("DEFAULT_ITEMS_PER_PAGE")
                .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
                .parse()
                .expect("DEFAULT_ITEMS_PER_PAGE must be a valid number"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_loads_dotenv_itself() {
        // No caller loads .env first; from_env has to stand alone.
        let config = Config::from_env();
        assert!(!config.mongodb_uri.is_empty());
        assert!(!config.database_name.is_empty());
        assert!(config.server_port > 0);
    }
}
