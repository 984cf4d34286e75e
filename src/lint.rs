//! Diagnostics for a finished composition.
//!
//! Nothing reported here is an error: unresolved markers and unused partials
//! are normal while a page is being assembled incrementally. The checks only
//! make them visible.

use std::fmt;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::partial::PartialSet;
use crate::template::{Composition, Span};

/// A warning about a marker or partial that took no part in the output
#[derive(Debug)]
pub struct CompositionWarning {
    pub category: WarningCategory,
    pub message: String,
    /// Location in the template, for marker warnings
    pub span: Option<Span>,
}

/// Category of composition warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCategory {
    /// Marker names a partial that was not loaded
    Unresolved,
    /// Partial was loaded but no marker used it
    Unused,
    /// Marker skipped because its partial was already substituted
    Repeat,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningCategory::Unresolved => write!(f, "unresolved"),
            WarningCategory::Unused => write!(f, "unused"),
            WarningCategory::Repeat => write!(f, "repeat"),
        }
    }
}

/// Collect warnings for a composition, markers first in document order,
/// then unused partials by name.
pub fn check(composition: &Composition, partials: &PartialSet) -> Vec<CompositionWarning> {
    let mut warnings = Vec::new();

    let mut marker_warnings: Vec<_> = composition
        .unresolved
        .iter()
        .map(|site| (site, WarningCategory::Unresolved))
        .chain(
            composition
                .repeated
                .iter()
                .map(|site| (site, WarningCategory::Repeat)),
        )
        .collect();
    marker_warnings.sort_by_key(|(site, _)| site.line);

    for (site, category) in marker_warnings {
        let message = match category {
            WarningCategory::Unresolved => {
                format!("no partial named '{}'", site.marker.name)
            }
            _ => format!(
                "partial '{}' was already substituted earlier; this marker is left as is",
                site.marker.name
            ),
        };
        warnings.push(CompositionWarning {
            category,
            message,
            span: Some(site.span.clone()),
        });
    }

    for partial in partials.iter() {
        if composition.applied.contains(&partial.name) {
            continue;
        }
        let message = match &partial.path {
            Some(path) => format!(
                "partial '{}' ({}) is never referenced",
                partial.name,
                path.display()
            ),
            None => format!("partial '{}' is never referenced", partial.name),
        };
        warnings.push(CompositionWarning {
            category: WarningCategory::Unused,
            message,
            span: None,
        });
    }

    warnings
}

impl CompositionWarning {
    /// Format the warning, with template context when it has a location
    pub fn format(&self, source: &str, filename: &str, color: bool) -> String {
        let Some(span) = &self.span else {
            return format!("Warning[{}]: {}\n", self.category, self.message);
        };

        // ariadne counts characters, spans are in bytes
        let span = char_span(source, span);

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Warning, filename, span.start)
            .with_config(Config::default().with_color(color))
            .with_message(format!("[{}] {}", self.category, self.message))
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(&self.message)
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Warning[{}]: {}\n", self.category, self.message),
        }
    }
}

/// Convert a byte range into a character range over `source`
fn char_span(source: &str, span: &Span) -> Span {
    let chars_before = |offset: usize| {
        source
            .get(..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or_else(|| source.chars().count())
    };
    chars_before(span.start)..chars_before(span.end)
}
