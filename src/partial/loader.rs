//! Partial discovery and loading

use std::collections::btree_map::{self, BTreeMap};
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::ComposeError;

use super::normalize::normalize;

/// A named fragment with its indentation already normalized
#[derive(Debug, Clone, PartialEq)]
pub struct Partial {
    /// Name referenced by markers (file name without extension)
    pub name: String,
    /// File the fragment was read from, if any
    pub path: Option<PathBuf>,
    /// Normalized content, starting at column 0
    pub content: String,
}

impl Partial {
    /// Create a partial from raw text, normalizing its indentation
    pub fn new(name: impl Into<String>, raw: &str, comment_prefix: &str) -> Self {
        Self {
            name: name.into(),
            path: None,
            content: normalize(raw, comment_prefix),
        }
    }
}

/// Options controlling which files in a directory become partials
#[derive(Debug, Clone, Default)]
pub struct LoadOptions<'a> {
    /// Comment-opening token ignored when measuring indentation
    pub comment_prefix: &'a str,
    /// Only files with this extension are loaded
    pub extension: Option<&'a str>,
}

/// Set of partials keyed by name
///
/// Iteration is ordered by name; substitution never depends on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialSet {
    partials: BTreeMap<String, Partial>,
}

impl PartialSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file in `dir` (non-recursive) as a partial
    ///
    /// Sub-directories are skipped. Each file's name without its extension
    /// becomes the partial name; two files mapping to the same name is an
    /// error, as is any file that cannot be read as UTF-8 text.
    pub fn load_dir(dir: &Path, options: &LoadOptions<'_>) -> Result<Self, ComposeError> {
        let entries = fs::read_dir(dir).map_err(|e| ComposeError::reading(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ComposeError::reading(dir, e))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| ComposeError::reading(&path, e))?;

            if file_type.is_dir() {
                debug!("skipping directory {}", path.display());
                continue;
            }
            if let Some(wanted) = options.extension {
                if path.extension().and_then(|e| e.to_str()) != Some(wanted) {
                    debug!("skipping {} (extension is not .{})", path.display(), wanted);
                    continue;
                }
            }
            files.push(path);
        }
        // read_dir order is platform-dependent; sort so errors are reproducible
        files.sort();

        let mut set = Self::new();
        for path in files {
            let Some(name) = partial_name(&path) else {
                debug!("skipping {} (no usable file name)", path.display());
                continue;
            };
            let raw = fs::read_to_string(&path).map_err(|e| ComposeError::reading(&path, e))?;
            debug!("loaded partial '{}' from {}", name, path.display());

            let partial = Partial {
                path: Some(path),
                ..Partial::new(name, &raw, options.comment_prefix)
            };
            set.insert(partial)?;
        }

        Ok(set)
    }

    /// Add a partial, rejecting a second partial with the same name
    pub fn insert(&mut self, partial: Partial) -> Result<(), ComposeError> {
        match self.partials.entry(partial.name.clone()) {
            btree_map::Entry::Occupied(existing) => Err(ComposeError::DuplicatePartial {
                name: partial.name,
                first: existing.get().path.clone().unwrap_or_default(),
                second: partial.path.unwrap_or_default(),
            }),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(partial);
                Ok(())
            }
        }
    }

    /// Normalized content for a name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.partials.get(name).map(|p| p.content.as_str())
    }

    /// Check if a partial exists
    pub fn contains(&self, name: &str) -> bool {
        self.partials.contains_key(name)
    }

    /// Number of partials
    pub fn len(&self) -> usize {
        self.partials.len()
    }

    /// True if no partials were loaded
    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }

    /// All partial names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.partials.keys().map(|s| s.as_str())
    }

    /// All partials, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &Partial> {
        self.partials.values()
    }
}

impl FromIterator<(String, String)> for PartialSet {
    /// Build a set from already-normalized `(name, content)` pairs; later
    /// duplicates replace earlier ones
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let partials = iter
            .into_iter()
            .map(|(name, content)| {
                let partial = Partial {
                    name: name.clone(),
                    path: None,
                    content,
                };
                (name, partial)
            })
            .collect();
        Self { partials }
    }
}

/// File name with its extension stripped
fn partial_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}
