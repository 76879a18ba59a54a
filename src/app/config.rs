use std::env;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_MP_API_URL: &str = "https://api.mercadopago.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Mercado Pago bearer token. Empty means mock-only operation.
    pub access_token: String,
    pub mp_api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server_port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            access_token: lookup("MP_ACCESS_TOKEN").unwrap_or_default(),
            mp_api_url: lookup("MP_API_URL")
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_MP_API_URL.to_string()),
        }
    }

    pub fn has_provider_credential(&self) -> bool {
        !self.access_token.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_run_mock_only() {
        let config = Config::default();
        assert_eq!(config.server_port, 4000);
        assert_eq!(config.mp_api_url, "https://api.mercadopago.com");
        assert!(!config.has_provider_credential());
    }

    #[test]
    fn test_reads_port_and_token() {
        let config = config_from(&[("PORT", "8081"), ("MP_ACCESS_TOKEN", "APP_USR-123")]);
        assert_eq!(config.server_port, 8081);
        assert_eq!(config.access_token, "APP_USR-123");
        assert!(config.has_provider_credential());
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.server_port, 4000);
    }

    #[test]
    fn test_empty_token_means_no_credential() {
        let config = config_from(&[("MP_ACCESS_TOKEN", "")]);
        assert!(!config.has_provider_credential());
    }
}
