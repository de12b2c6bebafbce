//! Turning configured step lists into resolvable chains.

use std::collections::HashMap;
use std::sync::Arc;

use super::types::{AwsStep, Config, SecretConfig, StepConfig, expand_tilde};
use crate::error::{Result, SecretError};
use crate::secrets::{
    AwsSecretsManagerSecret, Base64EncodedSecret, ChainedSecret, EnvironmentVariable,
    FileSystemSecret, JsonField, Secret, Step,
};

impl Config {
    /// Build the chain configured under `name`.
    ///
    /// `secret "other"` steps become nested chains. Each referenced secret is
    /// built once and shared by every step that names it; a reference cycle
    /// is a config error.
    pub fn secret(&self, name: &str) -> Result<ChainedSecret> {
        ChainBuilder::new(self).build_chain(name)
    }

    fn aws_step(&self, step: &AwsStep) -> Step {
        let (region, profile) = self.aws_settings(step);
        match &step.secret_id {
            Some(secret_id) => Step::instance(aws_secret(
                secret_id.clone(),
                region.as_deref(),
                profile.as_deref(),
            )),
            None => Step::constructor(move |secret_id: String| {
                aws_secret(secret_id, region.as_deref(), profile.as_deref())
            }),
        }
    }

    /// Region and profile for an `aws` step, falling back to `defaults`.
    fn aws_settings(&self, step: &AwsStep) -> (Option<String>, Option<String>) {
        let region = step
            .region
            .clone()
            .or_else(|| self.default_region().map(str::to_string));
        let profile = step
            .profile
            .clone()
            .or_else(|| self.default_profile().map(str::to_string));
        (region, profile)
    }
}

/// Per-call state for [`Config::secret`]: the reference path being built
/// and the chains already built, keyed by secret name.
struct ChainBuilder<'a> {
    config: &'a Config,
    stack: Vec<&'a str>,
    built: HashMap<&'a str, Arc<dyn Secret>>,
}

impl<'a> ChainBuilder<'a> {
    fn new(config: &'a Config) -> Self {
        Self {
            config,
            stack: Vec::new(),
            built: HashMap::new(),
        }
    }

    fn build_chain(&mut self, name: &str) -> Result<ChainedSecret> {
        if self.stack.iter().any(|seen| *seen == name) {
            return Err(SecretError::config(format!(
                "secret reference cycle: {} -> {}",
                self.stack.join(" -> "),
                name
            )));
        }
        let config = self.config;
        let definition: &'a SecretConfig = config
            .get(name)
            .ok_or_else(|| SecretError::NotFound(name.to_string()))?;

        self.stack.push(definition.name.as_str());
        let steps = definition
            .steps
            .iter()
            .map(|step| self.build_step(step))
            .collect::<Result<Vec<_>>>()?;
        self.stack.pop();

        tracing::debug!(secret = name, steps = steps.len(), "built chain from config");
        ChainedSecret::new(steps)
    }

    /// A referenced chain, built on first use and shared afterwards.
    fn shared_chain(&mut self, name: &'a str) -> Result<Arc<dyn Secret>> {
        if let Some(chain) = self.built.get(name) {
            return Ok(Arc::clone(chain));
        }
        let chain: Arc<dyn Secret> = Arc::new(self.build_chain(name)?);
        self.built.insert(name, Arc::clone(&chain));
        Ok(chain)
    }

    fn build_step(&mut self, step: &'a StepConfig) -> Result<Step> {
        let step = match step {
            StepConfig::Literal(l) => Step::literal(l.value.clone()),
            StepConfig::Env(e) => match &e.name {
                Some(name) => Step::instance(EnvironmentVariable::new(name.clone())),
                None => Step::constructor(EnvironmentVariable::new),
            },
            StepConfig::File(f) => match &f.path {
                Some(path) => Step::instance(FileSystemSecret::new(expand_tilde(path))),
                None => Step::constructor(|path: String| FileSystemSecret::new(expand_tilde(&path))),
            },
            StepConfig::Base64(b) => match &b.encoded {
                Some(encoded) => Step::instance(Base64EncodedSecret::new(encoded.clone())),
                None => Step::constructor(Base64EncodedSecret::new),
            },
            StepConfig::Aws(a) => self.config.aws_step(a),
            StepConfig::JsonField(j) => {
                let key = j.key.clone();
                Step::transform(move |document: String| Ok(JsonField::new(document, key.clone())))
            }
            StepConfig::Secret(r) => Step::shared(self.shared_chain(&r.name)?),
        };
        Ok(step)
    }
}

fn aws_secret(
    secret_id: String,
    region: Option<&str>,
    profile: Option<&str>,
) -> AwsSecretsManagerSecret {
    let mut secret = AwsSecretsManagerSecret::new(secret_id);
    if let Some(region) = region {
        secret = secret.with_region(region);
    }
    if let Some(profile) = profile {
        secret = secret.with_profile(profile);
    }
    secret
}
