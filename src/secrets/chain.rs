//! Chains of secret steps resolved left to right into one value.
//!
//! Each step either replaces the running value (a literal or a secret
//! instance) or consumes it (a constructor or transform that turns the
//! previous value into a new secret, which is then resolved). This covers
//! both "decode what the previous step produced" and "use this other source
//! instead" with a single step list.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Result, SecretError};
use crate::secrets::Secret;

type BuildFn = Box<dyn Fn(String) -> Box<dyn Secret> + Send + Sync>;
type TransformFn = Box<dyn Fn(String) -> Result<Box<dyn Secret>> + Send + Sync>;

/// One link in a [`ChainedSecret`].
pub enum Step {
    /// Used as the value directly.
    Literal(String),
    /// Resolved on its own; the previous value is discarded.
    Instance(Arc<dyn Secret>),
    /// Builds a secret from the previous value, e.g. `Base64EncodedSecret::new`.
    Constructor(BuildFn),
    /// Fallible function from the previous value to a secret.
    Transform(TransformFn),
}

impl Step {
    pub fn literal(value: impl Into<String>) -> Self {
        Step::Literal(value.into())
    }

    pub fn instance(secret: impl Secret + 'static) -> Self {
        Step::Instance(Arc::new(secret))
    }

    /// An instance step backed by a secret that is also used elsewhere.
    pub fn shared(secret: Arc<dyn Secret>) -> Self {
        Step::Instance(secret)
    }

    pub fn constructor<S, F>(build: F) -> Self
    where
        S: Secret + 'static,
        F: Fn(String) -> S + Send + Sync + 'static,
    {
        Step::Constructor(Box::new(move |previous| Box::new(build(previous))))
    }

    pub fn transform<S, F>(transform: F) -> Self
    where
        S: Secret + 'static,
        F: Fn(String) -> Result<S> + Send + Sync + 'static,
    {
        Step::Transform(Box::new(move |previous| {
            transform(previous).map(|secret| Box::new(secret) as Box<dyn Secret>)
        }))
    }

    /// Short name of the step variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Literal(_) => "literal",
            Step::Instance(_) => "instance",
            Step::Constructor(_) => "constructor",
            Step::Transform(_) => "transform",
        }
    }

    fn needs_previous(&self) -> bool {
        matches!(self, Step::Constructor(_) | Step::Transform(_))
    }
}

// Literal contents may be secret material, so only the kind is shown.
impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step::{}", self.kind())
    }
}

/// A secret resolved through an ordered, non-empty list of [`Step`]s.
///
/// ```no_run
/// use secret_chain::{Base64EncodedSecret, ChainedSecret, EnvironmentVariable, Secret, Step};
///
/// # async fn example() -> secret_chain::Result<()> {
/// let password = ChainedSecret::new(vec![
///     Step::instance(EnvironmentVariable::new("ADMIN_PASSWORD")),
///     Step::constructor(Base64EncodedSecret::new),
/// ])?;
/// let value = password.resolve().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChainedSecret {
    steps: Vec<Step>,
}

impl ChainedSecret {
    /// Build a chain, rejecting shapes that can never resolve.
    ///
    /// The list must be non-empty and must not start with a constructor or
    /// transform, since there is no previous value for them to consume.
    pub fn new(steps: Vec<Step>) -> Result<Self> {
        match steps.first() {
            None => Err(SecretError::EmptyChain),
            Some(first) if first.needs_previous() => Err(SecretError::invalid_chain(format!(
                "the first step must be a literal or a secret, not a {}",
                first.kind()
            ))),
            Some(_) => Ok(Self { steps }),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[async_trait]
impl Secret for ChainedSecret {
    async fn resolve(&self) -> Result<String> {
        let mut value: Option<String> = None;

        for (index, step) in self.steps.iter().enumerate() {
            tracing::trace!(index, kind = step.kind(), "resolving chain step");

            let next = match step {
                Step::Literal(literal) => literal.clone(),
                Step::Instance(secret) => secret.resolve().await?,
                Step::Constructor(build) => {
                    let previous = value.take().ok_or_else(|| no_previous(step))?;
                    build(previous).resolve().await?
                }
                Step::Transform(transform) => {
                    let previous = value.take().ok_or_else(|| no_previous(step))?;
                    transform(previous)?.resolve().await?
                }
            };
            value = Some(next);
        }

        value.ok_or(SecretError::EmptyChain)
    }
}

fn no_previous(step: &Step) -> SecretError {
    SecretError::invalid_chain(format!("{} step has no previous value", step.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{Base64EncodedSecret, EnvironmentVariable};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        value: String,
        calls: AtomicUsize,
    }

    impl Counting {
        fn new(value: &str) -> Arc<Self> {
            Arc::new(Self {
                value: value.to_string(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Secret for Counting {
        async fn resolve(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.value.clone())
        }
    }

    struct Echo(String);

    #[async_trait]
    impl Secret for Echo {
        async fn resolve(&self) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_empty_chain_fails_at_construction() {
        let err = ChainedSecret::new(vec![]).unwrap_err();
        assert!(matches!(err, SecretError::EmptyChain));
    }

    #[test]
    fn test_leading_constructor_is_rejected() {
        let err = ChainedSecret::new(vec![Step::constructor(Base64EncodedSecret::new)])
            .unwrap_err();
        assert!(matches!(err, SecretError::InvalidChain(_)));

        let err = ChainedSecret::new(vec![Step::transform(|v| Ok(Echo(v)))]).unwrap_err();
        assert!(matches!(err, SecretError::InvalidChain(_)));
    }

    #[tokio::test]
    async fn test_single_literal() {
        let chain = ChainedSecret::new(vec![Step::literal("plain")]).unwrap();
        assert_eq!(chain.resolve().await.unwrap(), "plain");
    }

    #[tokio::test]
    async fn test_instance_overrides_previous_value() {
        let first = Counting::new("first");
        let second = Counting::new("second");
        let chain = ChainedSecret::new(vec![
            Step::shared(first.clone()),
            Step::shared(second.clone()),
        ])
        .unwrap();

        assert_eq!(chain.resolve().await.unwrap(), "second");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_each_resolve_is_fresh() {
        let source = Counting::new("again");
        let chain = ChainedSecret::new(vec![Step::shared(source.clone())]).unwrap();

        chain.resolve().await.unwrap();
        chain.resolve().await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_transform_receives_previous_value() {
        let chain = ChainedSecret::new(vec![
            Step::literal("abc"),
            Step::transform(|v| Ok(Echo(v.to_uppercase()))),
        ])
        .unwrap();
        assert_eq!(chain.resolve().await.unwrap(), "ABC");
    }

    #[tokio::test]
    async fn test_transform_error_propagates_unchanged() {
        let chain = ChainedSecret::new(vec![
            Step::literal("abc"),
            Step::transform(|_| -> Result<Echo> { Err(SecretError::NotFound("inner".into())) }),
        ])
        .unwrap();

        let err = chain.resolve().await.unwrap_err();
        assert!(matches!(err, SecretError::NotFound(ref name) if name == "inner"));
    }

    #[tokio::test]
    async fn test_failing_step_stops_the_chain() {
        let after = Counting::new("never");
        let chain = ChainedSecret::new(vec![
            Step::instance(EnvironmentVariable::new("SECRET_CHAIN_TEST_CHAIN_UNSET")),
            Step::shared(after.clone()),
        ])
        .unwrap();

        let err = chain.resolve().await.unwrap_err();
        assert!(matches!(err, SecretError::UndefinedVariable(_)));
        assert_eq!(after.calls(), 0);
    }

    #[tokio::test]
    async fn test_downstream_literal_wins() {
        let chain =
            ChainedSecret::new(vec![Step::literal("from-source"), Step::literal("override")])
                .unwrap();
        assert_eq!(chain.resolve().await.unwrap(), "override");
    }

    #[tokio::test]
    async fn test_env_then_base64_constructor() {
        // SAFETY: the variable name is unique to this test.
        unsafe {
            std::env::set_var("SECRET_CHAIN_TEST_CHAIN_B64", STANDARD.encode("s3cr3t"));
        }
        let chain = ChainedSecret::new(vec![
            Step::instance(EnvironmentVariable::new("SECRET_CHAIN_TEST_CHAIN_B64")),
            Step::constructor(Base64EncodedSecret::new),
        ])
        .unwrap();
        assert_eq!(chain.resolve().await.unwrap(), "s3cr3t");
    }

    #[tokio::test]
    async fn test_nested_chains() {
        let inner = ChainedSecret::new(vec![
            Step::literal(STANDARD.encode("inner")),
            Step::constructor(Base64EncodedSecret::new),
        ])
        .unwrap();
        let outer = ChainedSecret::new(vec![
            Step::instance(inner),
            Step::transform(|v| Ok(Echo(format!("{}-outer", v)))),
        ])
        .unwrap();

        assert_eq!(outer.resolve().await.unwrap(), "inner-outer");
    }

    #[test]
    fn test_debug_hides_literals() {
        let chain = ChainedSecret::new(vec![Step::literal("hunter2")]).unwrap();
        let debug = format!("{:?}", chain);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("literal"));
    }
}
