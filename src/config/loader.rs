//! Configuration file loading and generation.

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::error::{Result, SecretError};

const FILE_NAME: &str = "secret-chain.kdl";

const SAMPLE_CONFIG: &str = r#"// Defaults for `aws` steps that don't set region/profile themselves
// defaults region="us-east-1" profile="default"

// Steps run top to bottom. `env`, `file`, `base64` and `aws` read from their
// argument when given one, otherwise from the value of the previous step.

// Base64 blob in an environment variable
secret "admin_password" {
    env "ADMIN_PASSWORD"
    base64
}

// Path to a mounted secret file, taken from the environment
// secret "tls_key" {
//     env "TLS_KEY_PATH"
//     file
// }

// One field of a JSON secret in AWS Secrets Manager
// secret "db_password" {
//     aws "prod/db" region="us-west-2"
//     json-field "password"
// }

// Reuse another chain, then override it with a fixed value
// secret "dev_password" {
//     secret "admin_password"
//     literal "dev"
// }
"#;

impl Config {
    /// Get the explicit ~/.config/secret-chain/secret-chain.kdl path
    fn xdg_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config/secret-chain").join(FILE_NAME))
    }

    /// Get the list of config file search paths in priority order
    fn get_config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. ./secret-chain.kdl (project-local config wins)
        paths.push(PathBuf::from(FILE_NAME));

        // 2. ~/.config/secret-chain/secret-chain.kdl
        if let Some(xdg_path) = Self::xdg_config_path() {
            paths.push(xdg_path);
        }

        // 3. Platform-native config directory, unless it is the XDG path
        if let Some(config_dir) = dirs::config_dir() {
            let native_path = config_dir.join("secret-chain").join(FILE_NAME);
            if Self::xdg_config_path().as_ref() != Some(&native_path) {
                paths.push(native_path);
            }
        }

        paths
    }

    /// Find existing config file by searching all standard locations
    pub fn find_existing_config() -> Option<PathBuf> {
        Self::get_config_search_paths()
            .into_iter()
            .find(|path| path.exists())
    }

    /// Get the default config path (~/.config/secret-chain/secret-chain.kdl)
    pub fn default_config_path() -> PathBuf {
        Self::xdg_config_path().unwrap_or_else(|| PathBuf::from(FILE_NAME))
    }

    /// Parse configuration text. `file_name` is only used in error messages.
    pub fn parse(file_name: &str, content: &str) -> Result<Self> {
        Ok(knuffel::parse::<Config>(file_name, content)?)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SecretError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// Load configuration, searching the standard locations.
    /// An absent file yields an empty configuration.
    pub fn load() -> Result<Self> {
        match Self::find_existing_config() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load_from_path(&path)
            }
            None => Ok(Config::default()),
        }
    }

    /// Generate a commented sample config file
    pub fn generate_config_file(path: Option<PathBuf>, overwrite: bool) -> Result<PathBuf> {
        let config_path = path.unwrap_or_else(Self::default_config_path);

        if config_path.exists() && !overwrite {
            return Err(SecretError::config(format!(
                "config file already exists at: {}. Use --overwrite to replace it.",
                config_path.display()
            )));
        }

        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, SAMPLE_CONFIG)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StepConfig;

    #[test]
    fn test_sample_config_parses() {
        let config = Config::parse(FILE_NAME, SAMPLE_CONFIG).unwrap();
        assert_eq!(config.names(), vec!["admin_password"]);
        assert!(config.defaults.is_none());
    }

    #[test]
    fn test_parse_all_step_kinds() {
        let config = Config::parse(
            "test.kdl",
            r#"
            defaults region="us-east-1" profile="ops"
            secret "everything" {
                literal "seed"
                env "NAME"
                env
                file "/run/secrets/token"
                file
                base64 "czNjcjN0"
                base64
                aws "prod/db" region="eu-west-1"
                aws
                json-field "password"
                secret "other"
            }
            "#,
        )
        .unwrap();

        assert_eq!(config.default_region(), Some("us-east-1"));
        assert_eq!(config.default_profile(), Some("ops"));

        let steps = &config.get("everything").unwrap().steps;
        let names: Vec<_> = steps.iter().map(StepConfig::node_name).collect();
        assert_eq!(
            names,
            vec![
                "literal",
                "env",
                "env",
                "file",
                "file",
                "base64",
                "base64",
                "aws",
                "aws",
                "json-field",
                "secret"
            ]
        );
        assert!(matches!(&steps[2], StepConfig::Env(e) if e.name.is_none()));
        assert!(matches!(
            &steps[7],
            StepConfig::Aws(a) if a.region.as_deref() == Some("eu-west-1") && a.profile.is_none()
        ));
    }

    #[test]
    fn test_unknown_step_is_config_error() {
        let err = Config::parse("bad.kdl", "secret \"x\" {\n    vault \"a\"\n}\n").unwrap_err();
        assert!(matches!(err, SecretError::Config(_)));
    }

    #[test]
    fn test_generate_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/secret-chain.kdl");

        let written = Config::generate_config_file(Some(path.clone()), false).unwrap();
        assert_eq!(written, path);
        assert!(Config::load_from_path(&path).is_ok());

        let err = Config::generate_config_file(Some(path.clone()), false).unwrap_err();
        assert!(matches!(err, SecretError::Config(_)));
        assert!(Config::generate_config_file(Some(path), true).is_ok());
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = Config::load_from_path(Path::new("/nonexistent/secret-chain.kdl")).unwrap_err();
        assert!(matches!(err, SecretError::Config(_)));
    }
}
