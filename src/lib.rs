//! Page Composer - assembles a page from a base template and partial fragments
//!
//! A template contains include markers (`{{> name}}`) on lines of their own.
//! Each partial is a file in a directory whose name, minus its extension,
//! is the marker name. Partials are normalized to column 0 and re-indented
//! to the column of the marker they replace.
//!
//! # Example
//!
//! ```rust
//! use page_composer::{compose, PartialSet, SubstitutionMode};
//!
//! let partials: PartialSet = [("footer".to_string(), "<p>Hi</p>".to_string())]
//!     .into_iter()
//!     .collect();
//!
//! let result = compose("<body>\n  {{> footer}}\n</body>", &partials, SubstitutionMode::First);
//! assert_eq!(result.output, "<body>\n  <p>Hi</p>\n</body>");
//! ```

pub mod config;
pub mod error;
pub mod lint;
pub mod partial;
pub mod template;

use std::fs;
use std::path::PathBuf;

use log::info;

pub use config::{BuildConfig, ConfigError};
pub use error::ComposeError;
pub use lint::{CompositionWarning, WarningCategory};
pub use partial::{LoadOptions, Partial, PartialSet};
pub use template::{compose, Composition, SubstitutionMode};

/// Everything read and computed for one build, before anything is written
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Template the markers were read from
    pub template_path: PathBuf,
    /// Raw template text
    pub template: String,
    /// Partials loaded from the partials directory
    pub partials: PartialSet,
    /// Substitution result
    pub composition: Composition,
}

impl Assembly {
    /// Warnings about unresolved markers and unused partials
    pub fn warnings(&self) -> Vec<CompositionWarning> {
        lint::check(&self.composition, &self.partials)
    }

    /// Number of distinct partials that replaced a marker
    pub fn applied_count(&self) -> usize {
        self.composition.applied.len()
    }
}

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// File the merged output was written to
    pub output_path: PathBuf,
    pub assembly: Assembly,
}

impl BuildReport {
    /// Completion message naming the output and how many partials were used
    pub fn summary(&self) -> String {
        let name = self
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output_path.display().to_string());
        format!(
            "Built {} from template using {} partials.",
            name,
            self.assembly.applied_count()
        )
    }
}

/// Read the template and partials and compute the merged text
///
/// Nothing is written. Fails on the first missing or unreadable input.
pub fn assemble(config: &BuildConfig) -> Result<Assembly, ComposeError> {
    let template_path = config.template_path();
    let template = fs::read_to_string(&template_path)
        .map_err(|e| ComposeError::reading(&template_path, e))?;

    let options = LoadOptions {
        comment_prefix: &config.comment_prefix,
        extension: config.extension.as_deref(),
    };
    let partials = PartialSet::load_dir(&config.partials_path(), &options)?;

    let composition = compose(&template, &partials, config.mode);

    Ok(Assembly {
        template_path,
        template,
        partials,
        composition,
    })
}

/// Assemble the page and write it to the configured output path
///
/// The output is written once, after all substitutions succeed, so a failed
/// build never leaves a partially merged file behind.
pub fn build(config: &BuildConfig) -> Result<BuildReport, ComposeError> {
    let assembly = assemble(config)?;

    let output_path = config.output_path();
    fs::write(&output_path, &assembly.composition.output)
        .map_err(|e| ComposeError::writing(&output_path, e))?;
    info!(
        "wrote {} ({} bytes)",
        output_path.display(),
        assembly.composition.output.len()
    );

    Ok(BuildReport {
        output_path,
        assembly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn project(template: &str, partials: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::create_dir_all(root.join("partials/home")).unwrap();
        fs::write(root.join("templates/home.template.html"), template).unwrap();
        for (file, content) in partials {
            fs::write(root.join("partials/home").join(file), content).unwrap();
        }
        dir
    }

    fn config_for(root: &Path) -> BuildConfig {
        BuildConfig::new().with_root(root)
    }

    #[test]
    fn test_build_writes_merged_output() {
        let dir = project(
            "<body>\n  {{> footer}}\n</body>",
            &[("footer.html", "  <p>Hi</p>\n\n  <p>Bye</p>")],
        );
        let report = build(&config_for(dir.path())).unwrap();

        let written = fs::read_to_string(dir.path().join("home.html")).unwrap();
        assert_eq!(written, "<body>\n  <p>Hi</p>\n\n  <p>Bye</p>\n</body>");
        assert_eq!(report.output_path, dir.path().join("home.html"));
        assert_eq!(
            report.summary(),
            "Built home.html from template using 1 partials."
        );
    }

    #[test]
    fn test_summary_counts_applied_not_loaded() {
        let dir = project(
            "{{> a}}\n{{> missing}}",
            &[("a.html", "A"), ("b.html", "B")],
        );
        let report = build(&config_for(dir.path())).unwrap();
        assert_eq!(report.assembly.partials.len(), 2);
        assert_eq!(report.assembly.applied_count(), 1);
        assert_eq!(report.assembly.warnings().len(), 2);
    }

    #[test]
    fn test_assemble_does_not_write() {
        let dir = project("{{> a}}", &[("a.html", "A")]);
        let assembly = assemble(&config_for(dir.path())).unwrap();
        assert_eq!(assembly.composition.output, "A");
        assert!(!dir.path().join("home.html").exists());
    }

    #[test]
    fn test_missing_template_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = build(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, ComposeError::NotFound { .. }));
    }

    #[test]
    fn test_missing_partials_dir_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(dir.path().join("templates/home.template.html"), "x").unwrap();

        let err = build(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, ComposeError::NotFound { path } if path.ends_with("partials/home")));
        assert!(!dir.path().join("home.html").exists());
    }

    #[test]
    fn test_unwritable_output_is_write_error() {
        let dir = project("x", &[]);
        let config = config_for(dir.path()).with_output("no-such-dir/home.html");
        let err = build(&config).unwrap_err();
        assert!(matches!(err, ComposeError::Write { .. }));
    }

    #[test]
    fn test_output_overwritten() {
        let dir = project("{{> a}}", &[("a.html", "new")]);
        fs::write(dir.path().join("home.html"), "old contents").unwrap();
        build(&config_for(dir.path())).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("home.html")).unwrap(), "new");
    }
}
