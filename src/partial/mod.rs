//! Partial fragments: loading and indentation normalization

mod loader;
mod normalize;

pub use loader::{LoadOptions, Partial, PartialSet};
pub use normalize::{common_indent, indent_width, is_significant, normalize};
