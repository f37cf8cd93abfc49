use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{ImportResolver, ResolveError, ResolvedModule};
use crate::scanner::ImportDecl;

/// Resolver returning a fixed module list, for testing
pub struct StaticResolver {
    modules: Vec<ResolvedModule>,
    delay: Option<Duration>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StaticResolver {
    pub fn new(modules: Vec<ResolvedModule>) -> Self {
        Self {
            modules,
            delay: None,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A resolver whose every call fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    /// Sleep for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `resolve` calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImportResolver for StaticResolver {
    async fn resolve(
        &self,
        _base: &str,
        _imports: &[ImportDecl],
    ) -> Result<Vec<ResolvedModule>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.failure {
            Some(message) => Err(ResolveError::Other(message.clone())),
            None => Ok(self.modules.clone()),
        }
    }

    fn resolver_name(&self) -> &'static str {
        "static"
    }
}
