//! Template markers and substitution
//!
//! A template is plain text in which a line of the form
//!
//! ```text
//!     {{> footer}}
//! ```
//!
//! is replaced by the partial named `footer`, re-indented to the column the
//! marker starts at. There is no other syntax: no nesting, conditionals or
//! loops.

mod compose;
mod marker;

pub use compose::{compose, reindent, Composition, SubstitutionMode};
pub use marker::{lex, marker_site, parse_marker, scan_markers, Marker, MarkerSite, Span, Token};
