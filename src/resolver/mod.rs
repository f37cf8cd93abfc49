//! Import resolution
//!
//! Symbols of imported modules come from an external collaborator whose
//! latency is unbounded and which may fail outright. The indexer only ever
//! sees the result through [`resolve_with_timeout`], which turns every
//! failure into an empty module list.

pub mod command;
pub mod fs;
pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ResolverConfig;
use crate::scanner::ImportDecl;
use crate::symbol::{Symbol, Visibility};

pub use command::CommandResolver;
pub use fs::FsResolver;
pub use mock::StaticResolver;

/// Errors raised by resolver implementations
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A module or the outline command could not be read
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resolver did not answer in time
    #[error("Import resolution timed out after {0:?}")]
    Timeout(Duration),

    /// The outline response could not be decoded
    #[error("Malformed outline response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Resolver-specific failure
    #[error("{0}")]
    Other(String),
}

/// A function exported by a resolved module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFunction {
    pub name: String,
    pub signature: String,
    #[serde(default)]
    pub visibility: Visibility,
}

/// Declarations of one imported module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModule {
    /// Declared location of the module
    pub source: String,
    #[serde(default)]
    pub functions: Vec<ResolvedFunction>,
    /// Bare variable names, without the `$` sigil
    #[serde(default)]
    pub variables: Vec<String>,
}

impl ResolvedModule {
    /// Convert the module's declarations into imported symbols
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        let functions = self.functions.iter().map(move |f| {
            Symbol::imported_function(
                f.name.clone(),
                f.signature.clone(),
                f.visibility,
                self.source.clone(),
            )
        });
        let variables = self
            .variables
            .iter()
            .map(move |v| Symbol::imported_variable(v, self.source.clone()));
        functions.chain(variables)
    }
}

/// Body of an outline service response: `{"modules": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlineResponse {
    #[serde(default)]
    pub modules: Vec<ResolvedModule>,
}

impl OutlineResponse {
    /// Decode a response body. `null` decodes to an empty response.
    pub fn from_json(body: &str) -> Result<Self, ResolveError> {
        let parsed: Option<Self> = serde_json::from_str(body)?;
        Ok(parsed.unwrap_or_default())
    }
}

/// External collaborator that resolves imported modules to their declarations
#[async_trait]
pub trait ImportResolver: Send + Sync {
    /// Resolve `imports` of a document stored under `base`
    async fn resolve(
        &self,
        base: &str,
        imports: &[ImportDecl],
    ) -> Result<Vec<ResolvedModule>, ResolveError>;

    /// Resolver name for logging
    fn resolver_name(&self) -> &'static str;
}

/// The resolver selected by configuration: the outline command when one is
/// set, otherwise modules are read from disk
pub fn resolver_for(config: &ResolverConfig) -> Arc<dyn ImportResolver> {
    match CommandResolver::new(&config.command) {
        Some(resolver) => Arc::new(resolver),
        None => Arc::new(FsResolver::new()),
    }
}

/// Run `resolver` with a deadline. Errors and timeouts are logged and yield
/// an empty list.
pub async fn resolve_with_timeout(
    resolver: &dyn ImportResolver,
    base: &str,
    imports: &[ImportDecl],
    timeout: Duration,
) -> Vec<ResolvedModule> {
    if imports.is_empty() {
        return Vec::new();
    }

    debug!(
        "Resolving {} imports via {} resolver",
        imports.len(),
        resolver.resolver_name()
    );

    let result = match tokio::time::timeout(timeout, resolver.resolve(base, imports)).await {
        Ok(result) => result,
        Err(_) => Err(ResolveError::Timeout(timeout)),
    };

    match result {
        Ok(modules) => modules,
        Err(e) => {
            warn!(
                "Import resolution via {} failed: {}",
                resolver.resolver_name(),
                e
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolKind;

    #[test]
    fn test_resolver_for_config() {
        let mut config = ResolverConfig::default();
        assert_eq!(resolver_for(&config).resolver_name(), "filesystem");

        config.command = vec!["xq-outline".to_string(), "--json".to_string()];
        assert_eq!(resolver_for(&config).resolver_name(), "command");
    }

    #[test]
    fn test_outline_response_from_json() {
        let body = r#"{
            "modules": [{
                "source": "/db/apps/demo/modules/config.xqm",
                "functions": [
                    {"name": "config:resolve", "signature": "config:resolve($relPath as xs:string)", "visibility": "public"},
                    {"name": "config:secret", "signature": "config:secret()", "visibility": "private"}
                ],
                "variables": ["config:app-root", "config:data-root"]
            }]
        }"#;
        let response = OutlineResponse::from_json(body).unwrap();
        assert_eq!(response.modules.len(), 1);
        let module = &response.modules[0];
        assert_eq!(module.functions[1].visibility, Visibility::Private);

        let symbols: Vec<_> = module.symbols().collect();
        assert_eq!(symbols.len(), 4);
        assert!(symbols.iter().all(|s| s.source.as_deref() == Some(module.source.as_str())));
        let vars: Vec<_> = symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Variable)
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(vars, vec!["$config:app-root", "$config:data-root"]);
    }

    #[test]
    fn test_outline_response_null_and_missing_fields() {
        assert!(OutlineResponse::from_json("null").unwrap().modules.is_empty());

        let response = OutlineResponse::from_json(r#"{"modules":[{"source":"m.xqm"}]}"#).unwrap();
        assert!(response.modules[0].functions.is_empty());
        assert!(response.modules[0].variables.is_empty());
    }

    #[test]
    fn test_outline_response_malformed() {
        let err = OutlineResponse::from_json("{not json").unwrap_err();
        assert!(matches!(err, ResolveError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_resolve_with_timeout_swallows_failure() {
        let imports = vec![ImportDecl::new("m", "urn:m", "m.xqm")];
        let resolver = StaticResolver::failing("service unavailable");
        let modules =
            resolve_with_timeout(&resolver, "/db", &imports, Duration::from_secs(1)).await;
        assert!(modules.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_with_timeout_expires() {
        let imports = vec![ImportDecl::new("m", "urn:m", "m.xqm")];
        let resolver = StaticResolver::new(vec![ResolvedModule {
            source: "m.xqm".to_string(),
            functions: vec![],
            variables: vec!["m:x".to_string()],
        }])
        .with_delay(Duration::from_millis(200));
        let modules =
            resolve_with_timeout(&resolver, "/db", &imports, Duration::from_millis(20)).await;
        assert!(modules.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_with_timeout_skips_without_imports() {
        let resolver = StaticResolver::failing("must not be called");
        let modules = resolve_with_timeout(&resolver, "/db", &[], Duration::from_secs(1)).await;
        assert!(modules.is_empty());
        assert_eq!(resolver.call_count(), 0);
    }
}
