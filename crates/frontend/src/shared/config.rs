use gloo_net::http::Request;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub images: ImageConfig,
    pub samples: SampleConfig,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Empty string keeps API calls on the page origin (`/api/...`)
    pub base_url: String,
}

/// Where collection images live. Uploaded rows only carry a file name.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    pub base_url: String,
    pub id_prefix: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: "https://res.cloudinary.com/dccmraknj/image/upload/v1701226226/cabinet-photos/"
                .to_string(),
            id_prefix: "cabinet-photos/".to_string(),
        }
    }
}

/// Static sample templates offered for download
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SampleConfig {
    pub path: String,
    pub csv_file: String,
    pub excel_file: String,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            path: "/samples/".to_string(),
            csv_file: "sample-prod-collection.csv".to_string(),
            excel_file: "sample-prod-collection.xlsx".to_string(),
        }
    }
}

/// Served next to index.html; keys present there override the built-in defaults
const CONFIG_URL: &str = "/config.toml";

pub fn parse_config(contents: &str) -> Result<AppConfig, String> {
    toml::from_str(contents).map_err(|e| format!("Failed to parse config: {}", e))
}

/// Load configuration
///
/// Search order:
/// 1. `/config.toml` served with the static assets
/// 2. Falls back to built-in defaults
pub async fn load_config() -> AppConfig {
    match fetch_config().await {
        Ok(config) => {
            log::info!("Loaded config from {}", CONFIG_URL);
            config
        }
        Err(e) => {
            log::warn!("{}; using default configuration", e);
            AppConfig::default()
        }
    }
}

async fn fetch_config() -> Result<AppConfig, String> {
    let response = Request::get(CONFIG_URL)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch {}: {}", CONFIG_URL, e))?;

    if !response.ok() {
        return Err(format!("{} not available: {}", CONFIG_URL, response.status()));
    }

    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read {}: {}", CONFIG_URL, e))?;

    parse_config(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.base_url, "");
        assert_eq!(config.images.id_prefix, "cabinet-photos/");
        assert_eq!(config.samples.path, "/samples/");
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            [api]
            base_url = "https://admin.example.com"

            [images]
            id_prefix = "shop/"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert_eq!(config.images.id_prefix, "shop/");
        assert_eq!(config.images.base_url, ImageConfig::default().base_url);
        assert_eq!(config.samples, SampleConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(parse_config("[api\nbase_url = ").is_err());
    }
}
