//! Build configuration
//!
//! The defaults reproduce the fixed project layout the composer was written
//! for, rooted at the project the tool itself lives in, so running without
//! arguments needs no configuration at all and does not depend on the
//! working directory. A TOML file can override any of the paths and the
//! composition options.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::template::SubstitutionMode;

/// Default template location, relative to the project root
pub const DEFAULT_TEMPLATE: &str = "templates/home.template.html";
/// Default partials directory, relative to the project root
pub const DEFAULT_PARTIALS_DIR: &str = "partials/home";
/// Default output location, relative to the project root
pub const DEFAULT_OUTPUT: &str = "home.html";
/// Token that opens a comment line in partial fragments
pub const DEFAULT_COMMENT_PREFIX: &str = "<!--";

/// Project directory the tool belongs to, used as the default root
pub fn default_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration for a single build run
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Directory that relative paths resolve against
    pub root: PathBuf,
    /// Base template containing `{{> name}}` markers
    pub template: PathBuf,
    /// Directory of partial fragments, one file per partial
    pub partials_dir: PathBuf,
    /// Merged output file, overwritten on each run
    pub output: PathBuf,
    /// Lines starting with this token are ignored when measuring indentation
    pub comment_prefix: String,
    /// How many occurrences of a marker get substituted
    pub mode: SubstitutionMode,
    /// Only load partial files with this extension (all files when `None`)
    pub extension: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            partials_dir: PathBuf::from(DEFAULT_PARTIALS_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
            mode: SubstitutionMode::default(),
            extension: None,
        }
    }
}

/// TOML structure for deserializing config files
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    paths: TomlPaths,
    #[serde(default)]
    compose: TomlCompose,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlPaths {
    root: Option<PathBuf>,
    template: Option<PathBuf>,
    partials: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlCompose {
    comment_prefix: Option<String>,
    mode: Option<SubstitutionMode>,
    extension: Option<String>,
}

impl BuildConfig {
    /// Create a configuration with the default project layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// Relative paths resolve against the directory containing the config
    /// file, and so does a relative `paths.root`. Without `paths.root` that
    /// directory is the root.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        Self::from_toml(&content, Some(dir))
    }

    /// Load configuration from a TOML string, filling gaps with defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_toml(content, None)
    }

    fn from_toml(content: &str, base: Option<&Path>) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let root = match (parsed.paths.root, base) {
            (Some(root), Some(base)) if root.is_relative() => base.join(root),
            (Some(root), _) => root,
            (None, Some(base)) => base.to_path_buf(),
            (None, None) => defaults.root,
        };

        Ok(Self {
            root,
            template: parsed.paths.template.unwrap_or(defaults.template),
            partials_dir: parsed.paths.partials.unwrap_or(defaults.partials_dir),
            output: parsed.paths.output.unwrap_or(defaults.output),
            comment_prefix: parsed
                .compose
                .comment_prefix
                .unwrap_or(defaults.comment_prefix),
            mode: parsed.compose.mode.unwrap_or(defaults.mode),
            extension: parsed.compose.extension.map(|e| normalize_extension(&e)),
        })
    }

    /// Set the project root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the template path
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = path.into();
        self
    }

    /// Set the partials directory
    pub fn with_partials_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.partials_dir = path.into();
        self
    }

    /// Set the output path
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    /// Set the comment-opening token
    pub fn with_comment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.comment_prefix = prefix.into();
        self
    }

    /// Set the substitution mode
    pub fn with_mode(mut self, mode: SubstitutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Restrict partial loading to one file extension
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = Some(normalize_extension(extension.as_ref()));
        self
    }

    /// Template path resolved against the root
    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.template)
    }

    /// Partials directory resolved against the root
    pub fn partials_path(&self) -> PathBuf {
        self.root.join(&self.partials_dir)
    }

    /// Output path resolved against the root
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }
}

/// Accept both `html` and `.html`
fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_string()
}
