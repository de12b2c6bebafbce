//! Leaf secret providers, each backed by exactly one external resource.

mod aws;
mod encoded;
mod environment;
mod filesystem;
mod json;

pub use aws::AwsSecretsManagerSecret;
pub use encoded::Base64EncodedSecret;
pub use environment::EnvironmentVariable;
pub use filesystem::FileSystemSecret;
pub use json::JsonField;
