//! Indentation normalization for partial fragments
//!
//! Fragments are usually cut out of larger documents and carry the nesting
//! depth of wherever they were authored. Normalizing strips the common
//! indentation so that a fragment starts at column 0 and can be re-indented
//! to the column of the marker it replaces.

/// Strip the common leading indentation from a raw fragment
///
/// Trailing whitespace of the whole text is trimmed first. Lines starting
/// with `comment_prefix` (after their own indentation) do not take part in
/// computing the common indent, but are still shifted left when they are
/// indented at least that far.
///
/// # Example
///
/// ```rust
/// use page_composer::partial::normalize;
///
/// let out = normalize("    <nav>\n      <a>Home</a>\n    </nav>\n", "<!--");
/// assert_eq!(out, "<nav>\n  <a>Home</a>\n</nav>");
/// ```
pub fn normalize(raw: &str, comment_prefix: &str) -> String {
    let lines: Vec<&str> = raw.trim_end().split('\n').collect();
    let indent = common_indent(&lines, comment_prefix);
    if indent == 0 {
        return lines.join("\n");
    }

    lines
        .iter()
        .map(|line| dedent_line(line, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Minimum indentation over the significant lines, or 0 if there are none
pub fn common_indent(lines: &[&str], comment_prefix: &str) -> usize {
    lines
        .iter()
        .filter(|line| is_significant(line, comment_prefix))
        .map(|line| indent_width(line))
        .min()
        .unwrap_or(0)
}

/// A line counts towards the common indent if it is neither blank nor a comment
pub fn is_significant(line: &str, comment_prefix: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() {
        return false;
    }
    comment_prefix.is_empty() || !trimmed.starts_with(comment_prefix)
}

/// Number of leading whitespace characters
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Remove exactly `indent` leading whitespace characters, or nothing if the
/// line is indented less than that
fn dedent_line(line: &str, indent: usize) -> &str {
    if indent_width(line) < indent {
        return line;
    }
    match line.char_indices().nth(indent) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}
