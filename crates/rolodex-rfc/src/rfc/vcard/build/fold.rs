//! vCard line folding.

/// Folds a line so that no physical line exceeds `max_octets`.
///
/// Continuation lines start with one space, which counts toward their
/// length. Folds at UTF-8 character boundaries; every physical line carries
/// at least one character.
#[must_use]
pub fn fold_line(line: &str, max_octets: usize) -> String {
    if line.len() <= max_octets {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / max_octets.max(1) * 3);
    let mut current_len = 0;
    let mut segment_empty = true;

    for c in line.chars() {
        let char_len = c.len_utf8();

        if current_len + char_len > max_octets && !segment_empty {
            result.push_str("\r\n ");
            current_len = 1; // The space
        }

        result.push(c);
        current_len += char_len;
        segment_empty = false;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_line_unchanged() {
        let line = "FN:John Doe";
        assert_eq!(fold_line(line, 75), line);
    }

    #[test]
    fn fold_at_75_octets() {
        let folded = fold_line(&"X".repeat(80), 75);
        let parts: Vec<&str> = folded.split("\r\n").collect();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 75);
        assert_eq!(parts[1], format!(" {}", "X".repeat(5)));
    }

    #[test]
    fn every_segment_makes_progress() {
        assert_eq!(fold_line("ABC", 1), "A\r\n B\r\n C");
        assert_eq!(fold_line("ABCD", 2), "AB\r\n C\r\n D");
    }

    #[test]
    fn fold_respects_utf8() {
        // 日 is 3 bytes in UTF-8
        let line = format!("NOTE:{}", "日".repeat(30));
        let folded = fold_line(&line, 20);

        for part in folded.split("\r\n") {
            assert!(part.len() <= 20);
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn fold_multiple_times() {
        let folded = fold_line(&"X".repeat(200), 75);
        assert_eq!(folded.matches("\r\n ").count(), 2);
    }

    #[test]
    fn tiny_limit_still_progresses() {
        assert_eq!(fold_line("abc", 1), "a\r\n b\r\n c");
    }
}
