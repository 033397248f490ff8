//! Client configuration resolved once at startup.
//!
//! The backend base URL is the only environment-derived setting. WASM
//! bundles have no process environment, so the value is captured at build
//! time from `SEJIWA_API_URL`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl ClientConfig {
    /// Build config from the build-time environment.
    ///
    /// Optional:
    /// - `SEJIWA_API_URL`: backend base URL, default `DEFAULT_API_BASE_URL`
    pub fn from_env() -> Self {
        Self::from_raw(option_env!("SEJIWA_API_URL"))
    }

    pub(crate) fn from_raw(raw: Option<&str>) -> Self {
        let base = raw
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        Self { api_base_url: base.trim_end_matches('/').to_owned() }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_raw(None)
    }
}
