use crate::core::cookie::{CookieOptions, MAX_LIFETIME};
use crate::core::RequestContext;
use crate::utils::error::{BoxError, Result};
use crate::utils::validation::{
    validate_host, validate_non_empty_string, validate_path, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    pub cookie: CookieOptions,
    pub request: RequestConfig,
    pub logging: LoggingConfig,
}

/// Stand-in request used when the helpers run outside a web server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub host: String,
    pub uri: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            uri: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl BoxConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BoxError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BoxError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COOKIE_DOMAIN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BoxError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.request.host.clone(), self.request.uri.clone())
    }
}

impl Validate for BoxConfig {
    fn validate(&self) -> Result<()> {
        validate_path("cookie.path", &self.cookie.path)?;
        if let Some(lifetime) = self.cookie.lifetime {
            validate_range("cookie.lifetime", lifetime, -1, MAX_LIFETIME)?;
        }
        if let Some(domain) = &self.cookie.domain {
            validate_non_empty_string("cookie.domain", domain)?;
        }

        validate_host("request.host", &self.request.host)?;
        if !self.request.uri.starts_with('/') {
            return Err(BoxError::InvalidConfigValueError {
                field: "request.uri".to_string(),
                value: self.request.uri.clone(),
                reason: "Request URI must start with '/'".to_string(),
            });
        }

        Ok(())
    }
}
