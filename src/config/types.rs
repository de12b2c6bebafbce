//! Configuration type definitions.

use knuffel::Decode;
use std::path::PathBuf;

/// Expand tilde (~) prefix to the user's home directory.
/// Handles both "~" alone and "~/path/to/something" patterns.
pub(crate) fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Main configuration structure parsed from secret-chain.kdl.
#[derive(Debug, Decode, Clone, Default)]
pub struct Config {
    #[knuffel(child)]
    pub defaults: Option<Defaults>,

    #[knuffel(children(name = "secret"))]
    pub secrets: Vec<SecretConfig>,
}

/// Defaults applied to every `aws` step that does not set its own.
#[derive(Debug, Decode, Clone, Default)]
pub struct Defaults {
    #[knuffel(property)]
    pub region: Option<String>,

    #[knuffel(property)]
    pub profile: Option<String>,
}

/// A named chain: `secret "name" { step... }`.
#[derive(Debug, Decode, Clone)]
pub struct SecretConfig {
    #[knuffel(argument)]
    pub name: String,

    #[knuffel(children)]
    pub steps: Vec<StepConfig>,
}

/// One step node inside a `secret` block.
///
/// `env`, `file`, `base64` and `aws` read their input from their argument when
/// given one, and from the previous step's value otherwise.
#[derive(Debug, Decode, Clone)]
pub enum StepConfig {
    Literal(LiteralStep),
    Env(EnvStep),
    File(FileStep),
    Base64(Base64Step),
    Aws(AwsStep),
    JsonField(JsonFieldStep),
    Secret(SecretRefStep),
}

#[derive(Debug, Decode, Clone)]
pub struct LiteralStep {
    #[knuffel(argument)]
    pub value: String,
}

#[derive(Debug, Decode, Clone)]
pub struct EnvStep {
    #[knuffel(argument)]
    pub name: Option<String>,
}

#[derive(Debug, Decode, Clone)]
pub struct FileStep {
    #[knuffel(argument)]
    pub path: Option<String>,
}

#[derive(Debug, Decode, Clone)]
pub struct Base64Step {
    #[knuffel(argument)]
    pub encoded: Option<String>,
}

#[derive(Debug, Decode, Clone)]
pub struct AwsStep {
    #[knuffel(argument)]
    pub secret_id: Option<String>,

    #[knuffel(property)]
    pub region: Option<String>,

    #[knuffel(property)]
    pub profile: Option<String>,
}

#[derive(Debug, Decode, Clone)]
pub struct JsonFieldStep {
    #[knuffel(argument)]
    pub key: String,
}

#[derive(Debug, Decode, Clone)]
pub struct SecretRefStep {
    #[knuffel(argument)]
    pub name: String,
}

impl StepConfig {
    /// Node name as written in the config file.
    pub fn node_name(&self) -> &'static str {
        match self {
            StepConfig::Literal(_) => "literal",
            StepConfig::Env(_) => "env",
            StepConfig::File(_) => "file",
            StepConfig::Base64(_) => "base64",
            StepConfig::Aws(_) => "aws",
            StepConfig::JsonField(_) => "json-field",
            StepConfig::Secret(_) => "secret",
        }
    }
}

impl Config {
    /// Names of all configured secrets, in file order.
    pub fn names(&self) -> Vec<&str> {
        self.secrets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a secret definition by name.
    pub fn get(&self, name: &str) -> Option<&SecretConfig> {
        self.secrets.iter().find(|s| s.name == name)
    }

    /// Default AWS region, if set.
    pub fn default_region(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.region.as_deref())
    }

    /// Default AWS profile, if set.
    pub fn default_profile(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.profile.as_deref())
    }
}
