//! Filesystem-backed import resolution
//!
//! Follows the `at "location"` hint of each import, reads the module from
//! disk and scans it with the same scanner used for local declarations.

use async_trait::async_trait;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{ImportResolver, ResolveError, ResolvedFunction, ResolvedModule};
use crate::scanner::{self, imports::DB_SCHEME, ImportDecl};
use crate::symbol::Visibility;

/// Resolves imports against files below a base directory
#[derive(Debug, Clone, Default)]
pub struct FsResolver;

impl FsResolver {
    pub fn new() -> Self {
        Self
    }

    /// Path of the module named by `location` for a document under `base`
    pub fn module_path(base: &str, location: &str) -> PathBuf {
        let location = location.strip_prefix(DB_SCHEME).unwrap_or(location);
        let path = Path::new(location);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(base.strip_prefix(DB_SCHEME).unwrap_or(base)).join(path)
        }
    }

    /// Exported declarations of a module's source text. Private functions are
    /// not visible to importers.
    pub fn outline(source: &str, text: &str) -> ResolvedModule {
        let functions = scanner::scan_functions(text)
            .into_iter()
            .filter(|f| f.visibility == Visibility::Public)
            .map(|f| ResolvedFunction {
                signature: f.signature.unwrap_or_else(|| format!("{}()", f.name)),
                name: f.name,
                visibility: f.visibility,
            })
            .collect();
        let variables = scanner::scan_variables(text)
            .into_iter()
            .map(|v| v.name.trim_start_matches('$').to_string())
            .collect();

        ResolvedModule {
            source: source.to_string(),
            functions,
            variables,
        }
    }

    async fn load(base: &str, import: &ImportDecl) -> Result<ResolvedModule, ResolveError> {
        let path = Self::module_path(base, &import.location);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ResolveError::Io {
                path: path.clone(),
                source,
            })?;
        debug!("Loaded module {} from {}", import.prefix, path.display());
        Ok(Self::outline(&import.location, &text))
    }
}

#[async_trait]
impl ImportResolver for FsResolver {
    async fn resolve(
        &self,
        base: &str,
        imports: &[ImportDecl],
    ) -> Result<Vec<ResolvedModule>, ResolveError> {
        let results = join_all(imports.iter().map(|import| Self::load(base, import))).await;

        let mut modules = Vec::with_capacity(results.len());
        let mut last_error = None;
        for result in results {
            match result {
                Ok(module) => modules.push(module),
                Err(e) => {
                    warn!("Skipping import: {}", e);
                    last_error = Some(e);
                }
            }
        }

        // Only fail when nothing at all could be resolved
        match last_error {
            Some(e) if modules.is_empty() => Err(e),
            _ => Ok(modules),
        }
    }

    fn resolver_name(&self) -> &'static str {
        "filesystem"
    }
}
