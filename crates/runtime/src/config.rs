//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Where content lives, what to replay and how to label the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory holding `config.toml` and the RON catalogs.
    pub data_dir: PathBuf,
    /// Scenario file to replay. Relative paths resolve against the working directory.
    pub scenario: Option<PathBuf>,
    /// Label attached to log output.
    pub session_id: String,
    /// When set, logs are also written under `<log_dir>/<session_id>/`.
    pub log_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            scenario: None,
            session_id: "local".to_string(),
            log_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `HUNTER_DATA_DIR`
    /// - `HUNTER_SCENARIO`
    /// - `HUNTER_SESSION_ID`
    /// - `HUNTER_LOG_DIR`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = read_env::<PathBuf>("HUNTER_DATA_DIR") {
            config.data_dir = data_dir;
        }

        config.scenario = read_env::<PathBuf>("HUNTER_SCENARIO");

        if let Some(session_id) = read_env::<String>("HUNTER_SESSION_ID")
            && !session_id.trim().is_empty()
        {
            config.session_id = session_id;
        }

        config.log_dir = read_env::<PathBuf>("HUNTER_LOG_DIR");

        config
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_scenario(mut self, scenario: impl Into<PathBuf>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = RuntimeConfig::default()
            .with_data_dir("/srv/hunter")
            .with_scenario("boss.ron");

        assert_eq!(config.data_dir, PathBuf::from("/srv/hunter"));
        assert_eq!(config.scenario, Some(PathBuf::from("boss.ron")));
        assert_eq!(config.session_id, "local");
        assert!(config.log_dir.is_none());
    }
}
