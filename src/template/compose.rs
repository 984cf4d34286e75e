//! Marker substitution

use std::borrow::Cow;
use std::collections::BTreeSet;

use log::debug;
use serde::Deserialize;

use crate::partial::PartialSet;

use super::marker::{marker_site, MarkerSite};

/// How many markers for the same partial get substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionMode {
    /// Only the first marker for each name; later ones stay verbatim
    #[default]
    First,
    /// Every marker for each name
    All,
}

/// Result of substituting markers in a template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    /// Merged text
    pub output: String,
    /// Names of partials that replaced at least one marker
    pub applied: BTreeSet<String>,
    /// Markers naming a partial that does not exist, left verbatim
    pub unresolved: Vec<MarkerSite>,
    /// Markers left verbatim because their partial was already used
    pub repeated: Vec<MarkerSite>,
}

/// Replace marker lines in `template` with their partials
///
/// The template is walked once, line by line. A marker line whose name is in
/// `partials` is replaced by the partial's content with the marker's indent
/// prepended to every non-empty line. Markers for unknown names, and partials
/// no marker refers to, are left alone. Substituted content is not scanned
/// for further markers.
pub fn compose(template: &str, partials: &PartialSet, mode: SubstitutionMode) -> Composition {
    let mut applied: BTreeSet<String> = BTreeSet::new();
    let mut unresolved = Vec::new();
    let mut repeated = Vec::new();
    let mut offset = 0;

    let lines: Vec<Cow<'_, str>> = template
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            let line_start = offset;
            offset += line.len() + 1;

            let Some(site) = marker_site(line, line_start, index + 1) else {
                return Cow::Borrowed(line);
            };
            let name = &site.marker.name;

            let Some(content) = partials.get(name) else {
                debug!("line {}: no partial named '{}'", site.line, name);
                unresolved.push(site);
                return Cow::Borrowed(line);
            };
            if mode == SubstitutionMode::First && applied.contains(name) {
                debug!("line {}: '{}' already substituted", site.line, name);
                repeated.push(site);
                return Cow::Borrowed(line);
            }

            let replaced = reindent(content, &site.marker.indent);
            applied.insert(site.marker.name);
            Cow::Owned(replaced)
        })
        .collect();

    Composition {
        output: lines.join("\n"),
        applied,
        unresolved,
        repeated,
    }
}

/// Prefix every non-empty line of `content` with `indent`
///
/// ```rust
/// use page_composer::template::reindent;
///
/// assert_eq!(reindent("<p>a</p>\n\n<p>b</p>", "  "), "  <p>a</p>\n\n  <p>b</p>");
/// ```
pub fn reindent(content: &str, indent: &str) -> String {
    content
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                Cow::Borrowed(line)
            } else {
                Cow::Owned(format!("{}{}", indent, line))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
