//! Backslash escape decoding and separator-aware splitting.

/// Unescapes a vCard text value.
///
/// `\;`, `\,` and `\\` yield the literal character, `\n` and `\N` a
/// newline. A backslash before any other character is kept along with that
/// character; such escapes are non-standard and can be detected with
/// [`has_nonstandard_escape`].
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.next() {
            Some(';') => result.push(';'),
            Some(',') => result.push(','),
            Some('n' | 'N') => result.push('\n'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Returns whether the value contains a backslash escape outside the
/// standard set.
#[must_use]
pub fn has_nonstandard_escape(s: &str) -> bool {
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' && !matches!(chars.next(), Some(';' | ',' | 'n' | 'N' | '\\')) {
            return true;
        }
    }

    false
}

/// Splits on `separator` where it is not escaped.
///
/// Escapes are tracked as pairs, so in `a\;b` the backslash is escaped
/// and the semicolon separates. The parts are returned still escaped.
#[must_use]
pub fn split_unescaped(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&s[start..]);

    parts
}

/// Parses a structured value (N, ADR, ORG) into unescaped components.
///
/// Every segment present in the source is returned, including explicitly
/// empty ones.
#[must_use]
pub fn parse_structured(s: &str) -> Vec<String> {
    split_unescaped(s, ';')
        .into_iter()
        .map(unescape_text)
        .collect()
}

/// Parses a comma-separated list value (NICKNAME, CATEGORIES).
#[must_use]
pub fn parse_text_list(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }

    split_unescaped(s, ',')
        .into_iter()
        .map(unescape_text)
        .collect()
}
