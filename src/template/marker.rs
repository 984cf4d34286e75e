//! Lexer and line parser for `{{> name}}` include markers using logos

use logos::Logos;

/// Byte range in template text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    #[token("{{")]
    Open,
    #[token("}}")]
    Close,
    #[token(">")]
    Include,

    // Not skipped: the grammar requires exactly one space after `>`
    #[regex(r"[ \t]+", |lex| lex.slice().to_string())]
    Whitespace(String),

    // Anything a file stem can hold, short of whitespace and the delimiters
    #[regex(r"[^\s{}>]+", |lex| lex.slice().to_string())]
    Ident(String),
}

/// An include marker parsed from one template line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Leading spaces and tabs before the marker
    pub indent: String,
    /// Partial name referenced by the marker
    pub name: String,
}

/// A marker together with where it sits in the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSite {
    pub marker: Marker,
    /// 1-based line number
    pub line: usize,
    /// Byte range of the marker text, excluding its indent
    pub span: Span,
}

/// Lex marker text into tokens with spans, dropping unrecognized input
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

/// Parse a template line as a marker
///
/// The whole line, apart from its indentation and trailing whitespace, must
/// be `{{> name}}`. Markers embedded in other text are not recognized.
///
/// # Example
///
/// ```rust
/// use page_composer::template::parse_marker;
///
/// let marker = parse_marker("    {{> footer}}").unwrap();
/// assert_eq!(marker.indent, "    ");
/// assert_eq!(marker.name, "footer");
///
/// assert!(parse_marker("<p>{{> footer}}</p>").is_none());
/// ```
pub fn parse_marker(line: &str) -> Option<Marker> {
    let (indent, body) = split_marker_line(line);

    // Any unrecognized character disqualifies the line
    let tokens = Token::lexer(body).collect::<Result<Vec<_>, _>>().ok()?;

    match tokens.as_slice() {
        [Token::Open, Token::Include, Token::Whitespace(space), Token::Ident(name), Token::Close]
            if space == " " =>
        {
            Some(Marker {
                indent: indent.to_string(),
                name: name.clone(),
            })
        }
        _ => None,
    }
}

/// Parse a template line as a marker and locate it in the template
///
/// `line_start` is the byte offset of `line` within the template and
/// `line_number` its 1-based position.
pub fn marker_site(line: &str, line_start: usize, line_number: usize) -> Option<MarkerSite> {
    let marker = parse_marker(line)?;
    let (indent, body) = split_marker_line(line);
    let start = line_start + indent.len();
    Some(MarkerSite {
        marker,
        line: line_number,
        span: start..start + body.len(),
    })
}

/// Find every marker in a template, in document order
pub fn scan_markers(template: &str) -> Vec<MarkerSite> {
    let mut sites = Vec::new();
    let mut offset = 0;

    for (index, line) in template.split('\n').enumerate() {
        sites.extend(marker_site(line, offset, index + 1));
        offset += line.len() + 1;
    }

    sites
}

/// Split a line into its space/tab indent and the trimmed remainder
fn split_marker_line(line: &str) -> (&str, &str) {
    let body = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - body.len()];
    (indent, body.trim_end())
}
