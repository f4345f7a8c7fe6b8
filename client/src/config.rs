use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::region::OverlapPolicy;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const PREDICT_PATH: &str = "/predecir";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoint_path: String,
    /// No timeout unless configured; a request may stay pending.
    pub timeout: Option<Duration>,
    pub overlap: OverlapPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint_path: PREDICT_PATH.to_string(),
            timeout: None,
            overlap: OverlapPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `PREDICTOR_URL`, `PREDICTOR_TIMEOUT_SECS`
    /// and `PREDICTOR_OVERLAP`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ClientConfig::default();

        if let Some(url) = lookup("PREDICTOR_URL") {
            config.base_url = url;
        }

        if let Some(raw) = lookup("PREDICTOR_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidVar {
                var: "PREDICTOR_TIMEOUT_SECS",
                expected: "a whole number of seconds",
                value: raw.clone(),
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(raw) = lookup("PREDICTOR_OVERLAP") {
            config.overlap = match raw.trim() {
                "latest-submission" => OverlapPolicy::LatestSubmission,
                "last-response" => OverlapPolicy::LastResponse,
                _ => {
                    return Err(ConfigError::InvalidVar {
                        var: "PREDICTOR_OVERLAP",
                        expected: "latest-submission or last-response",
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(self.base_url.clone(), e))?;
        base.join(&self.endpoint_path)
            .map_err(|e| ConfigError::InvalidUrl(self.endpoint_path.clone(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://127.0.0.1:8000/predecir"
        );
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("PREDICTOR_URL", "http://predictor:9000"),
            ("PREDICTOR_TIMEOUT_SECS", "15"),
            ("PREDICTOR_OVERLAP", "last-response"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.overlap, OverlapPolicy::LastResponse);
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://predictor:9000/predecir"
        );
    }

    #[test]
    fn zero_timeout_means_none() {
        let config = ClientConfig::from_lookup(lookup(&[("PREDICTOR_TIMEOUT_SECS", "0")])).unwrap();
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("PREDICTOR_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidVar { var: "PREDICTOR_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("PREDICTOR_OVERLAP", "random")])),
            Err(ConfigError::InvalidVar { var: "PREDICTOR_OVERLAP", .. })
        ));
        assert!(matches!(
            ClientConfig::new("not a url").endpoint_url(),
            Err(ConfigError::InvalidUrl(..))
        ));
    }
}
