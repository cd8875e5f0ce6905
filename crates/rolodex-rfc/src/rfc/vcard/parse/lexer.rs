//! vCard lexer for line unfolding and content line parsing.
//!
//! Works on bytes so that unfolding is independent of the charset; values
//! are decoded per field later.

use super::error::{ParseWarning, WarningKind};
use crate::rfc::vcard::core::{VCardParameter, encodings};

/// One logical line after unfolding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Physical line number where the logical line starts (1-based).
    pub number: usize,
    /// Unfolded bytes, without the line terminator.
    pub bytes: Vec<u8>,
}

/// Lazy, single-pass iterator over the logical lines of a buffer.
///
/// A physical line that begins with a space or horizontal tab continues the
/// previous logical line; that one whitespace character is stripped. Lines
/// end with `\r\n` or a bare `\n`. Quoted-printable values additionally
/// continue across a trailing `=` (soft line break). Blank lines are skipped.
#[derive(Debug)]
pub struct LogicalLines<'a> {
    input: &'a [u8],
    pos: usize,
    next_line: usize,
}

impl<'a> LogicalLines<'a> {
    /// Creates an iterator numbering lines from 1.
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self::starting_at(input, 1)
    }

    /// Creates an iterator whose first physical line has number `first_line`.
    #[must_use]
    pub const fn starting_at(input: &'a [u8], first_line: usize) -> Self {
        Self {
            input,
            pos: 0,
            next_line: first_line,
        }
    }

    fn next_physical(&mut self) -> Option<&'a [u8]> {
        let rest = self.input.get(self.pos..).filter(|r| !r.is_empty())?;
        let (line, advance) = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        self.pos += advance;
        self.next_line += 1;
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }

    fn continues(&self) -> bool {
        matches!(self.input.get(self.pos), Some(b' ' | b'\t'))
    }
}

impl Iterator for LogicalLines<'_> {
    type Item = LogicalLine;

    fn next(&mut self) -> Option<LogicalLine> {
        loop {
            let number = self.next_line;
            let first = self.next_physical()?;
            if first.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let mut bytes = first.to_vec();
            let soft_breaks = is_quoted_printable(&bytes);

            loop {
                if soft_breaks && bytes.last() == Some(&b'=') {
                    let Some(next) = self.next_physical() else {
                        break;
                    };
                    bytes.pop();
                    bytes.extend_from_slice(next);
                } else if self.continues() {
                    let Some(next) = self.next_physical() else {
                        break;
                    };
                    bytes.extend_from_slice(&next[1..]);
                } else {
                    break;
                }
            }

            return Some(LogicalLine { number, bytes });
        }
    }
}

/// Returns whether the line header declares quoted-printable encoding.
fn is_quoted_printable(line: &[u8]) -> bool {
    let Some(header_end) = find_value_separator(line) else {
        return false;
    };
    let qp = encodings::QUOTED_PRINTABLE.as_bytes();
    line[..header_end]
        .windows(qp.len())
        .any(|w| w.eq_ignore_ascii_case(qp))
}

/// A logical line split into its parts, value still undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'a> {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<VCardParameter>,
    /// Raw value bytes.
    pub value: &'a [u8],
}

/// Parses a logical line into its components.
///
/// Format: `[group.]name[;param[=value[,value]*]]*:value`. Bare parameter
/// tokens become `TYPE` values, or `ENCODING` values when they name a
/// transfer encoding. Unparseable parameters are skipped with a warning.
///
/// ## Errors
/// Returns a [`WarningKind::MalformedLine`] warning if the line has no colon
/// separator or an invalid property name.
pub fn parse_content_line<'a>(
    line: &'a LogicalLine,
    warnings: &mut Vec<ParseWarning>,
) -> Result<ContentLine<'a>, ParseWarning> {
    let colon_pos = find_value_separator(&line.bytes)
        .ok_or_else(|| ParseWarning::malformed_line(line.number, "missing colon separator"))?;

    let header = String::from_utf8_lossy(&line.bytes[..colon_pos]);
    let value = &line.bytes[colon_pos + 1..];

    let segments = split_unquoted(&header, ';');
    let (group, name) = parse_group(segments[0].trim());

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseWarning::malformed_line(
            line.number,
            format!("invalid property name: {name}"),
        ));
    }

    let params = parse_parameters(&segments[1..], line.number, warnings);

    Ok(ContentLine {
        group: group.map(String::from),
        name: name.to_ascii_uppercase(),
        params,
        value,
    })
}

/// Finds the colon that separates name/params from value.
///
/// Colons inside quoted parameter values do not count.
fn find_value_separator(line: &[u8]) -> Option<usize> {
    let mut in_quotes = false;

    for (i, &b) in line.iter().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b':' if !in_quotes => return Some(i),
            _ => {}
        }
    }

    None
}

/// Parses optional group prefix.
fn parse_group(s: &str) -> (Option<&str>, &str) {
    if let Some((potential_group, name)) = s.split_once('.') {
        // Group must be alphanumeric + hyphen
        if !potential_group.is_empty()
            && potential_group
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return (Some(potential_group), name);
        }
    }
    (None, s)
}

/// Splits on `separator` outside double quotes.
fn split_unquoted(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == separator && !in_quotes {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&s[start..]);

    parts
}

fn parse_parameters(
    segments: &[&str],
    line_num: usize,
    warnings: &mut Vec<ParseWarning>,
) -> Vec<VCardParameter> {
    let mut params = Vec::new();

    for segment in segments.iter().map(|s| s.trim()) {
        if segment.is_empty() {
            continue;
        }

        match segment.split_once('=') {
            Some((name, values)) => {
                let name = name.trim();
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                {
                    tracing::warn!(line = line_num, segment, "Skipping invalid parameter");
                    warnings.push(ParseWarning::new(
                        WarningKind::InvalidParameter,
                        line_num,
                        format!("invalid parameter: {segment}"),
                    ));
                    continue;
                }
                params.push(VCardParameter::multi(name, parse_param_values(values)));
            }
            None => {
                // vCard 2.1 bare tokens: TEL;HOME;VOICE, PHOTO;BASE64
                for token in segment.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    if encodings::is_encoding_token(token) {
                        params.push(VCardParameter::encoding(token.to_ascii_uppercase()));
                    } else {
                        params.push(VCardParameter::type_param(token));
                    }
                }
            }
        }
    }

    params
}

/// Parses parameter values (comma-separated, possibly quoted).
///
/// Applies RFC 6868 caret decoding.
fn parse_param_values(s: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            '^' => match chars.peek() {
                Some('n' | 'N') => {
                    chars.next();
                    current.push('\n');
                }
                Some('\'') => {
                    chars.next();
                    current.push('"');
                }
                Some('^') => {
                    chars.next();
                    current.push('^');
                }
                _ => current.push('^'),
            },
            _ => current.push(c),
        }
    }
    values.push(current);

    values
}
