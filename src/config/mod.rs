use crate::client::{Credentials, DEFAULT_BASE_URL};
use crate::Result;
use std::env;
use std::fs;

#[derive(Debug, Clone)]
pub struct Config {
    pub site: SiteConfig,
    pub http_port: u16,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub passkey: Option<String>,
}

impl Config {
    pub fn load_json_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let value = content.parse::<serde_json::Value>()?;

        let mut config = Self::default();
        config.merge_json(&value);
        Ok(config)
    }

    fn merge_json(&mut self, val: &serde_json::Value) {
        if let serde_json::Value::Object(table) = val {
            if let Some(val) = table.get("site") {
                self.site.merge_json(val);
            }
            if let Some(port) = table.get("http_port").and_then(|v| v.as_u64()) {
                self.http_port = port as u16;
            }
        }
    }

    /// Environment variables override whatever the file said; these are the
    /// names the original deployment used.
    pub fn apply_env(&mut self) {
        if let Ok(v) = env::var("NCORE_BASE_URL") {
            self.site.base_url = v;
        }
        if let Ok(v) = env::var("NCORE_USERNAME") {
            self.site.username = v;
        }
        if let Ok(v) = env::var("NCORE_PASSWORD") {
            self.site.password = v;
        }
        if let Ok(v) = env::var("NCORE_PASSKEY") {
            self.site.passkey = Some(v);
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.site.username.clone(),
            password: self.site.password.clone(),
            passkey: self.site.passkey.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            http_port: 3000,
        }
    }
}

impl SiteConfig {
    fn merge_json(&mut self, val: &serde_json::Value) {
        if let serde_json::Value::Object(table) = val {
            if let Some(v) = table.get("base_url").and_then(|v| v.as_str()) {
                self.base_url = v.to_string();
            }
            if let Some(v) = table.get("username").and_then(|v| v.as_str()) {
                self.username = v.to_string();
            }
            if let Some(v) = table.get("password").and_then(|v| v.as_str()) {
                self.password = v.to_string();
            }
            if let Some(v) = table.get("passkey").and_then(|v| v.as_str()) {
                self.passkey = Some(v.to_string());
            }
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::new(),
            password: String::new(),
            passkey: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.site.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.http_port, 3000);
    }

    #[test]
    fn merge_json() {
        let mut config = Config::default();

        let json_val = r#"
        {
            "http_port": 8080,
            "site": {
                "username": "user",
                "password": "secret",
                "passkey": "deadbeef"
            }
        }
        "#
        .parse::<serde_json::Value>()
        .unwrap();

        config.merge_json(&json_val);

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.site.username, "user");
        assert_eq!(config.site.password, "secret");
        assert_eq!(config.site.passkey.as_deref(), Some("deadbeef"));
        assert_eq!(config.site.base_url, DEFAULT_BASE_URL);
    }
}
