use std::{fs, path::Path};

use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Location of the credentials file when nothing else is configured.
pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not a valid JSON credentials object.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of `config.json`.
#[derive(Deserialize)]
struct RawConfig {
    token: Option<String>,
    #[serde(default)]
    http_cookies: IndexMap<String, String>,
}

/// Credentials handed to the data providers.
///
/// The open API authenticates with a bearer-style `token` in the request body,
/// the web endpoint with the browser session cookies in `http_cookies`. Both
/// are optional here; the provider that needs one reports its absence.
#[derive(Debug, Default)]
pub struct Credentials {
    token: Option<SecretString>,
    http_cookies: IndexMap<String, SecretString>,
}

impl Credentials {
    pub fn new<I>(token: Option<String>, http_cookies: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            token: token.map(|t| SecretString::new(t.into())),
            http_cookies: http_cookies
                .into_iter()
                .map(|(name, value)| (name, SecretString::new(value.into())))
                .collect(),
        }
    }

    /// Parses credentials from the JSON text of a config file.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        let raw: RawConfig = serde_json::from_str(s)?;
        Ok(Self::new(raw.token, raw.http_cookies))
    }

    /// Reads and parses the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Renders the cookie jar as a single `Cookie` header value
    /// (`name=value; other=value`), in config file order.
    pub fn cookie_header(&self) -> Option<SecretString> {
        if self.http_cookies.is_empty() {
            return None;
        }
        let joined = self
            .http_cookies
            .iter()
            .map(|(name, value)| format!("{name}={}", value.expose_secret()))
            .collect::<Vec<_>>()
            .join("; ");
        Some(SecretString::new(joined.into()))
    }
}
