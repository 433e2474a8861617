use std::path::PathBuf;

/// Region used when `GOOGLE_CLOUD_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-central1";

pub const PROJECT_ID_VAR: &str = "GOOGLE_CLOUD_PROJECT_ID";
pub const REGION_VAR: &str = "GOOGLE_CLOUD_REGION";
pub const CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Agent configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub project_id: Option<String>,
    pub region: String,
    pub credentials_path: Option<PathBuf>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            region: DEFAULT_REGION.to_string(),
            credentials_path: None,
        }
    }
}

impl AgentConfig {
    /// Load configuration from environment.
    ///
    /// - `GOOGLE_CLOUD_PROJECT_ID` (optional) — cloud project identifier
    /// - `GOOGLE_CLOUD_REGION` (optional, default `us-central1`)
    /// - `GOOGLE_APPLICATION_CREDENTIALS` (optional) — service account key path
    ///
    /// Never fails: anything missing stays `None` or falls back to its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            project_id: get(PROJECT_ID_VAR),
            region: get(REGION_VAR).unwrap_or_else(|| DEFAULT_REGION.to_string()),
            credentials_path: get(CREDENTIALS_VAR).map(PathBuf::from),
        }
    }

    /// Check that the variables a deployment needs are present.
    ///
    /// Logs a warning for the first missing one and returns `false`.
    pub fn validate_environment(&self) -> bool {
        if self.project_id.is_none() {
            tracing::warn!("{PROJECT_ID_VAR} is not set");
            return false;
        }
        true
    }
}
