//! Batch analysis over files and directories.
//!
//! The AnalysisContext provides:
//! - Directory walking with config-driven filtering
//! - Per-file size limits and language detection
//! - Parallel analysis with deterministic, path-sorted output
//!
//! Files are independent; every file gets its own parse and its own result.
//! A file that cannot be analyzed yields a failure message rather than
//! aborting the batch.

use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::AnalyzeError;
use crate::parser::SourceLanguage;
use crate::protocol::AnalysisMessage;

use super::analyzer::Analyzer;
use super::facts::AnalysisResult;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// Outcome of analyzing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAnalysis {
    /// Path relative to the context's base directory.
    pub path: String,
    pub message: AnalysisMessage,
}

impl FileAnalysis {
    pub fn is_success(&self) -> bool {
        self.message.is_success()
    }
}

/// Analysis context for a set of files.
pub struct AnalysisContext {
    /// Base directory for relative path resolution.
    base_dir: PathBuf,
    config: Config,
    /// Forces a language instead of detecting it from the extension.
    language: Option<SourceLanguage>,
    excluded: GlobSet,
}

impl AnalysisContext {
    /// Create a new analysis context. Fails if the config's exclusion
    /// patterns do not compile.
    pub fn new<P: AsRef<Path>>(base_dir: P, config: Config) -> anyhow::Result<Self> {
        let excluded = config.exclusion_set()?;
        Ok(Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            config,
            language: None,
            excluded,
        })
    }

    /// Analyze every file as `language`, whatever its extension.
    pub fn with_language(mut self, language: SourceLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Get the base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Collect the files a run over `root` should analyze, sorted by path.
    ///
    /// A file given directly is always returned. Directories are walked,
    /// skipping hidden directories (unless `include_hidden`), `node_modules`
    /// and excluded paths, and keeping only enabled extensions.
    pub fn collect_files(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }

        let include_hidden = self.config.include_hidden;
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                if !include_hidden && name.starts_with('.') {
                    return false;
                }
                !SKIPPED_DIRS.contains(&&*name)
            })
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !self.config.handles_extension(ext) {
                continue;
            }
            if self.excluded.is_match(self.relative_path(path)) {
                debug!(path = %path.display(), "excluded by config");
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Analyze a single file.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> FileAnalysis {
        let path = path.as_ref();
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        let rel_path = self.relative_path(&abs_path);

        let result = self.analyze_path(&abs_path, &rel_path);
        if let Err(e) = &result {
            warn!(path = %rel_path, error = %e, "failed to analyze file");
        }

        FileAnalysis {
            message: AnalysisMessage::from_result(result, Some(rel_path.as_str())),
            path: rel_path,
        }
    }

    fn analyze_path(&self, path: &Path, rel_path: &str) -> Result<AnalysisResult, AnalyzeError> {
        let language = match self.language {
            Some(language) => language,
            None => SourceLanguage::from_path(path).ok_or_else(|| {
                AnalyzeError::UnsupportedLanguage {
                    path: path.to_path_buf(),
                }
            })?,
        };

        let io_error = |source| AnalyzeError::Io {
            path: path.to_path_buf(),
            source,
        };
        let size = fs::metadata(path).map_err(io_error)?.len();
        if size > self.config.max_file_bytes {
            return Err(AnalyzeError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.config.max_file_bytes,
            });
        }
        let source = fs::read_to_string(path).map_err(io_error)?;

        Analyzer::new(language)
            .with_parse_timeout(self.config.parse_timeout())
            .analyze(&source, Some(rel_path))
    }

    /// Analyze multiple files in parallel. Results are sorted by path.
    pub fn analyze_files(&self, paths: &[PathBuf]) -> Vec<FileAnalysis> {
        let mut results: Vec<FileAnalysis> =
            paths.par_iter().map(|p| self.analyze_file(p)).collect();
        results.sort_by(|a, b| a.path.cmp(&b.path));
        results
    }

    /// Collect and analyze everything under `root`.
    pub fn analyze_path_tree(&self, root: &Path) -> anyhow::Result<Vec<FileAnalysis>> {
        let files = self.collect_files(root)?;
        debug!(root = %root.display(), files = files.len(), "collected files");
        Ok(self.analyze_files(&files))
    }

    fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}
