use serde::Deserialize;

/// Deployment environment, drives log format and HSTS
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Server configuration, read from environment variables
///
/// Only `DATABASE_URL` is required.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    pub database_url: String,
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// Comma-separated list of origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_db_max_connections() -> u32 {
    10
}

fn default_allowed_origins() -> String {
    "http://localhost:8080".to_string()
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
