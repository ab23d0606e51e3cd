//! Typed configuration for the backend and the image host.
//!
//! Hosts can deserialize these from a JSON config file; the defaults match
//! the local development setup the mock server provides.

use serde::Deserialize;

/// Where the REST backend lives and which resource paths it exposes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub products_path: String,
    pub users_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "http://localhost:3000".to_string(),
            products_path: "/products".to_string(),
            users_path: "/users".to_string(),
        }
    }
}

/// Image-host upload endpoint settings. The key travels as a query
/// parameter, the expiration controls how long the host keeps the image.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageHostConfig {
    pub base_url: String,
    pub api_key: String,
    pub expiration_secs: u64,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        ImageHostConfig {
            base_url: "https://api.imgbb.com/1/upload".to_string(),
            api_key: String::new(),
            expiration_secs: 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_dev_setup() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.products_path, "/products");
        assert_eq!(config.users_path, "/users");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"base_url":"http://api.internal:8080"}"#).unwrap();
        assert_eq!(config.base_url, "http://api.internal:8080");
        assert_eq!(config.products_path, "/products");

        let host: ImageHostConfig = serde_json::from_str(r#"{"api_key":"k"}"#).unwrap();
        assert_eq!(host.api_key, "k");
        assert_eq!(host.expiration_secs, 3600);
    }
}
