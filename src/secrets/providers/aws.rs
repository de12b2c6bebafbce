use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_sdk_secretsmanager::{Client, config::Region};
use tokio::sync::OnceCell;

use crate::error::{Result, SecretError};
use crate::secrets::Secret;

/// A secret stored in AWS Secrets Manager.
///
/// The SDK client is not built until the first `resolve()`, so a provider can
/// be declared before credentials are available. The client is then kept for
/// the lifetime of this instance. Initialization goes through a `OnceCell`,
/// so concurrent first calls still build only one client.
pub struct AwsSecretsManagerSecret {
    secret_id: String,
    region: Option<String>,
    profile: Option<String>,
    client: OnceCell<Client>,
}

impl AwsSecretsManagerSecret {
    pub fn new(secret_id: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            region: None,
            profile: None,
            client: OnceCell::new(),
        }
    }

    /// Use an already configured SDK client instead of loading one lazily.
    pub fn with_client(secret_id: impl Into<String>, client: Client) -> Self {
        Self {
            client: OnceCell::new_with(Some(client)),
            ..Self::new(secret_id)
        }
    }

    /// Region for the lazily built client. Defaults to the SDK's region chain.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Named profile from the shared AWS config/credentials files.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn is_client_initialized(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| load_client(self.region.clone(), self.profile.clone()))
            .await
    }
}

async fn load_client(region: Option<String>, profile: Option<String>) -> Client {
    tracing::debug!(?region, ?profile, "creating AWS Secrets Manager client");

    let region_provider = region
        .map(Region::new)
        .map(RegionProviderChain::first_try)
        .unwrap_or_else(RegionProviderChain::default_provider);

    let mut config_loader = aws_config::from_env().region(region_provider);

    // An explicit profile takes precedence over credentials in the environment.
    if let Some(profile_name) = &profile {
        let credentials_provider = ProfileFileCredentialsProvider::builder()
            .profile_name(profile_name)
            .build();
        config_loader = config_loader
            .profile_name(profile_name)
            .credentials_provider(credentials_provider);
    }

    let shared_config = config_loader.load().await;
    Client::new(&shared_config)
}

impl std::fmt::Debug for AwsSecretsManagerSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManagerSecret")
            .field("secret_id", &self.secret_id)
            .field("region", &self.region)
            .field("profile", &self.profile)
            .field("client_initialized", &self.is_client_initialized())
            .finish()
    }
}

#[async_trait]
impl Secret for AwsSecretsManagerSecret {
    async fn resolve(&self) -> Result<String> {
        tracing::debug!(secret_id = %self.secret_id, "fetching secret from AWS Secrets Manager");
        let resp = self
            .client()
            .await
            .get_secret_value()
            .secret_id(&self.secret_id)
            .send()
            .await
            .map_err(SecretError::aws)?;

        let secret_value = resp.secret_string().ok_or_else(|| {
            SecretError::provider(
                "aws",
                format!(
                    "secret '{}' is stored as binary, not a string",
                    self.secret_id
                ),
            )
        })?;
        Ok(secret_value.to_string())
    }
}
