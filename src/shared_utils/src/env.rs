use thiserror::Error;

/// Environment variable that points at the credentials file.
pub const CONFIG_PATH_VAR: &str = "LXR_CONFIG";

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing
/// or not valid unicode.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Resolves the credentials file path.
///
/// An explicit path wins, then `LXR_CONFIG`, then `./config.json`.
pub fn resolve_config_path(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| get_env_var(CONFIG_PATH_VAR).ok())
        .unwrap_or_else(|| crate::config::DEFAULT_CONFIG_PATH.to_string())
}
