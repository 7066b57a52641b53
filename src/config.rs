use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub azure: AzureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Azure 文档识别服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model_id: String,
    pub api_version: String,
    pub locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            azure: AzureConfig {
                endpoint: std::env::var("AZURE_FORM_ENDPOINT").unwrap_or_default(),
                api_key: std::env::var("AZURE_FORM_KEY").unwrap_or_default(),
                model_id: std::env::var("AZURE_FORM_MODEL")
                    .unwrap_or_else(|_| "prebuilt-invoice".to_string()),
                api_version: std::env::var("AZURE_FORM_API_VERSION")
                    .unwrap_or_else(|_| "2023-07-31".to_string()),
                locale: std::env::var("AZURE_FORM_LOCALE")
                    .unwrap_or_else(|_| "en-US".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        let config = AppConfig::from_env();
        assert_eq!(config.azure.model_id, "prebuilt-invoice");
        assert_eq!(config.azure.api_version, "2023-07-31");
        assert_eq!(config.azure.locale, "en-US");
    }
}
