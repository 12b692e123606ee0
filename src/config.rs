//! Configuration file and environment overrides.
//!
//! ```toml
//! [annotator]
//! endpoint = "https://language.googleapis.com"
//! api_key = "..."
//! timeout_secs = 30
//!
//! [classifier]
//! mention_policy = "per_mention"      # or "primary_mention"
//! conflict_strategy = "longest_span"  # or "priority"
//! possessives = false
//! match_capitalized_article = false
//! ```
//!
//! Environment variables win over the file: `ENTLIST_API_KEY`,
//! `ENTLIST_ACCESS_TOKEN`, `ENTLIST_ENDPOINT`, `ENTLIST_TIMEOUT_SECS`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::annotate::{Credentials, GoogleNlpAnnotator, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::classify::{Classifier, ClassifierConfig};
use crate::{Error, Result};

/// Environment variable holding an API key.
pub const ENV_API_KEY: &str = "ENTLIST_API_KEY";
/// Environment variable holding an OAuth access token.
pub const ENV_ACCESS_TOKEN: &str = "ENTLIST_ACCESS_TOKEN";
/// Environment variable overriding the service root.
pub const ENV_ENDPOINT: &str = "ENTLIST_ENDPOINT";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "ENTLIST_TIMEOUT_SECS";

/// Annotation service settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Service root
    pub endpoint: String,
    /// API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// OAuth access token, used when no API key is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl std::fmt::Debug for AnnotatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotatorConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AnnotatorConfig {
    /// Credentials to authenticate with. The API key wins when both are set.
    pub fn credentials(&self) -> Result<Credentials> {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        if let Some(key) = non_empty(&self.api_key) {
            Ok(Credentials::ApiKey(key))
        } else if let Some(token) = non_empty(&self.access_token) {
            Ok(Credentials::AccessToken(token))
        } else {
            Err(Error::config(format!(
                "no annotation credentials; set {ENV_API_KEY} or {ENV_ACCESS_TOKEN}, \
                 or api_key in the [annotator] section"
            )))
        }
    }

    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the annotation client these settings describe.
    pub fn build(&self) -> Result<GoogleNlpAnnotator> {
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(GoogleNlpAnnotator::new(self.credentials()?)
            .with_endpoint(self.endpoint.clone())
            .with_timeout(self.timeout()))
    }
}

/// Everything `entlist` can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Annotation service settings
    pub annotator: AnnotatorConfig,
    /// Classification settings
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Parse TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::config(format!("invalid config: {e}")))
    }

    /// Read a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    /// Read a config file if it exists, otherwise start from defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            log::debug!("loading config from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `ENTLIST_*` overrides from the process environment.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.annotator.api_key = Some(key);
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            self.annotator.access_token = Some(token);
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.annotator.endpoint = endpoint;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.annotator.timeout_secs = secs.trim().parse().map_err(|_| {
                Error::config(format!("{ENV_TIMEOUT_SECS} must be a whole number, got '{secs}'"))
            })?;
        }
        Ok(self)
    }

    /// TOML rendering with secrets masked.
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        let mask = |v: &mut Option<String>| {
            if v.is_some() {
                *v = Some("***".to_string());
            }
        };
        mask(&mut shown.annotator.api_key);
        mask(&mut shown.annotator.access_token);
        toml::to_string_pretty(&shown).map_err(|e| Error::config(e.to_string()))
    }

    /// Classifier built from these settings.
    #[must_use]
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.classifier.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MentionPolicy;
    use crate::rewrite::ConflictStrategy;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.annotator.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.annotator.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.classifier.mention_policy, MentionPolicy::PerMention);
        assert_eq!(
            config.classifier.conflict_strategy,
            ConflictStrategy::LongestSpan
        );
        assert!(!config.classifier.possessives);
    }

    #[test]
    fn test_parse_full_file() {
        let config = Config::from_toml_str(
            r#"
            [annotator]
            endpoint = "http://localhost:9000"
            api_key = "abc"
            timeout_secs = 5

            [classifier]
            mention_policy = "primary_mention"
            conflict_strategy = "priority"
            possessives = true
            "#,
        )
        .unwrap();
        assert_eq!(config.annotator.endpoint, "http://localhost:9000");
        assert_eq!(config.annotator.timeout_secs, 5);
        assert_eq!(
            config.classifier.mention_policy,
            MentionPolicy::PrimaryMention
        );
        assert_eq!(config.classifier.conflict_strategy, ConflictStrategy::Priority);
        assert!(config.classifier.possessives);
        assert!(!config.classifier.match_capitalized_article);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str("[classifier]\npossessives = true\n").unwrap();
        assert_eq!(config.annotator, AnnotatorConfig::default());
        assert!(config.classifier.possessives);
    }

    #[test]
    fn test_invalid_file() {
        let err = Config::from_toml_str("[classifier]\nmention_policy = \"sometimes\"\n")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());

        std::fs::write(&path, "[annotator]\ntimeout_secs = 7\n").unwrap();
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.annotator.timeout_secs, 7);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ACCESS_TOKEN, "tok"),
            (ENV_ENDPOINT, "http://proxy"),
            (ENV_TIMEOUT_SECS, " 12 "),
        ]
        .into_iter()
        .collect();
        let config = Config::default()
            .with_env_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.annotator.endpoint, "http://proxy");
        assert_eq!(config.annotator.timeout_secs, 12);
        assert_eq!(
            config.annotator.credentials().unwrap(),
            Credentials::AccessToken("tok".to_string())
        );
    }

    #[test]
    fn test_bad_timeout_env() {
        let err = Config::default()
            .with_env_from(|k| (k == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_credentials_precedence_and_absence() {
        let mut annotator = AnnotatorConfig::default();
        assert!(matches!(annotator.credentials(), Err(Error::Config(_))));
        assert!(annotator.build().is_err());

        annotator.access_token = Some("tok".into());
        annotator.api_key = Some("key".into());
        assert_eq!(
            annotator.credentials().unwrap(),
            Credentials::ApiKey("key".to_string())
        );
        assert!(annotator.build().is_ok());

        annotator.timeout_secs = 0;
        assert!(annotator.build().is_err());
    }

    #[test]
    fn test_redacted_toml_hides_secrets() {
        let mut config = Config::default();
        config.annotator.api_key = Some("super-secret".into());
        let shown = config.to_redacted_toml().unwrap();
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("***"));
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
