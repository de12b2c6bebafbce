//! Configuration loading and chain construction.

mod build;
mod loader;
mod types;

pub use types::{
    AwsStep, Base64Step, Config, Defaults, EnvStep, FileStep, JsonFieldStep, LiteralStep,
    SecretConfig, SecretRefStep, StepConfig,
};
