use ignore::WalkBuilder;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::IndexerConfig;

/// Finds XQuery sources below a root, respecting .gitignore and ignore patterns
pub struct Walker {
    root: PathBuf,
    extensions: HashSet<String>,
    ignore_patterns: Vec<String>,
}

impl Walker {
    pub fn new(root: PathBuf, config: &IndexerConfig) -> Self {
        Self {
            root,
            extensions: config.extensions.iter().cloned().collect(),
            ignore_patterns: config.ignore_patterns.clone(),
        }
    }

    /// Walk the tree, yielding files with a configured extension
    pub fn walk(&self) -> impl Iterator<Item = PathBuf> {
        let mut builder = WalkBuilder::new(&self.root);
        builder.git_ignore(true);
        builder.git_exclude(true);
        builder.hidden(true);

        let mut override_builder = ignore::overrides::OverrideBuilder::new(&self.root);
        for pattern in &self.ignore_patterns {
            let _ = override_builder.add(&format!("!{}", pattern));
            let _ = override_builder.add(&format!("!{}/**", pattern));
        }
        if let Ok(overrides) = override_builder.build() {
            builder.overrides(overrides);
        }

        let extensions = self.extensions.clone();
        let ignore_patterns = self.ignore_patterns.clone();
        let root = self.root.clone();

        builder
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter(move |entry| !is_ignored(entry.path(), &root, &ignore_patterns))
            .filter(move |entry| {
                entry
                    .path()
                    .extension()
                    .and_then(OsStr::to_str)
                    .map(|ext| extensions.contains(ext))
                    .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
    }

    /// All matching files, sorted for stable output
    pub fn collect_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<_> = self.walk().collect();
        files.sort();
        files
    }
}

/// Whether a path component below `root` equals one of `patterns`
fn is_ignored(path: &Path, root: &Path, patterns: &[String]) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .any(|c| patterns.iter().any(|p| c.as_os_str() == p.as_str()))
}
