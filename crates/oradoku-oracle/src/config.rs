//! Oracle connection settings.

use crate::OracleError;

/// Default base URL of the generative-model API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const DEFAULT_FAST_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_DEEP_MODEL: &str = "gemini-2.5-pro";

/// Connection settings for the hosted model service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    /// API key appended to every request.
    pub api_key: String,
    /// Model serving generation, hints, and image transcription.
    pub fast_model: String,
    /// Model serving solve requests.
    pub deep_model: String,
}

impl OracleConfig {
    /// Creates a configuration with default endpoint and models.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            fast_model: DEFAULT_FAST_MODEL.to_string(),
            deep_model: DEFAULT_DEEP_MODEL.to_string(),
        }
    }

    /// Reads the configuration from the surrounding environment.
    ///
    /// On native targets this is the process environment; on wasm it is
    /// same-named globals on the host page. `GEMINI_API_KEY` is required;
    /// `ORADOKU_ORACLE_URL`, `ORADOKU_FAST_MODEL`, and
    /// `ORADOKU_DEEP_MODEL` override the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::MissingApiKey`] when no key is set.
    pub fn from_env() -> Result<Self, OracleError> {
        let api_key = read_setting("GEMINI_API_KEY").ok_or(OracleError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Some(base_url) = read_setting("ORADOKU_ORACLE_URL") {
            config.base_url = base_url;
        }
        if let Some(fast_model) = read_setting("ORADOKU_FAST_MODEL") {
            config.fast_model = fast_model;
        }
        if let Some(deep_model) = read_setting("ORADOKU_DEEP_MODEL") {
            config.deep_model = deep_model;
        }
        Ok(config)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_setting(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn read_setting(name: &str) -> Option<String> {
    js_sys::Reflect::get(&js_sys::global(), &name.into())
        .ok()
        .and_then(|value| value.as_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_defaults() {
        let config = OracleConfig::new("secret".to_string());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.fast_model, DEFAULT_FAST_MODEL);
        assert_eq!(config.deep_model, DEFAULT_DEEP_MODEL);
    }
}
