//! Comment splitting.
//!
//! Platforms cap the size of a single comment. Long bodies are split in
//! ordered segments; every segment but the first starts with a continuation
//! prefix and every segment but the last ends with a continuation suffix.

/// Maximum number of characters allowed in a single GitHub comment.
pub const MAX_COMMENT_LENGTH: usize = 65536;

/// Prefix of a segment continuing a previous one.
pub const CONTINUATION_PREFIX: &str =
    "Continued from previous comment.\n<details><summary>Show Output</summary>\n\n```diff\n";

/// Suffix of a segment continued in the next one.
pub const CONTINUATION_SUFFIX: &str = "\n```\n</details>\n<br>\n\n**Warning**: Output length greater than max comment size. Continued in next comment.";

/// Splits comment bodies in bounded segments.
#[derive(Debug, Clone, Copy)]
pub struct CommentSplitter {
    max_length: usize,
    prefix: &'static str,
    suffix: &'static str,
}

impl Default for CommentSplitter {
    fn default() -> Self {
        Self::new(MAX_COMMENT_LENGTH, CONTINUATION_PREFIX, CONTINUATION_SUFFIX)
    }
}

impl CommentSplitter {
    /// Creates a splitter. Lengths are counted in characters.
    pub const fn new(max_length: usize, prefix: &'static str, suffix: &'static str) -> Self {
        Self {
            max_length,
            prefix,
            suffix,
        }
    }

    /// Split a body in segments of at most `max_length` characters, markers included.
    ///
    /// Cuts happen after the last line break fitting in a segment, or at the
    /// character limit when a single line is too long.
    pub fn split(&self, body: &str) -> Vec<String> {
        if body.chars().count() <= self.max_length {
            return vec![body.to_string()];
        }

        let markers_length = self.prefix.chars().count() + self.suffix.chars().count();
        let budget = self.max_length.saturating_sub(markers_length).max(1);

        let mut chunks = Vec::new();
        let mut rest = body;
        while !rest.is_empty() {
            let (chunk, tail) = rest.split_at(Self::cut_index(rest, budget));
            chunks.push(chunk);
            rest = tail;
        }

        let last_index = chunks.len() - 1;
        chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| {
                let mut segment = String::new();
                if index > 0 {
                    segment.push_str(self.prefix);
                }
                segment.push_str(chunk);
                if index < last_index {
                    segment.push_str(self.suffix);
                }
                segment
            })
            .collect()
    }

    /// Rebuild the original body from segments produced by [`Self::split`].
    pub fn join<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let last_index = segments.len().saturating_sub(1);
        segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let mut chunk = segment.as_ref();
                if index > 0 {
                    chunk = chunk.strip_prefix(self.prefix).unwrap_or(chunk);
                }
                if index < last_index {
                    chunk = chunk.strip_suffix(self.suffix).unwrap_or(chunk);
                }
                chunk
            })
            .collect()
    }

    /// Byte index where the next chunk of `text` ends.
    fn cut_index(text: &str, budget: usize) -> usize {
        let limit = match text.char_indices().nth(budget) {
            Some((index, _)) => index,
            None => return text.len(),
        };

        match text[..limit].rfind('\n') {
            Some(position) if position > 0 => position + 1,
            _ => limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SMALL: CommentSplitter = CommentSplitter::new(40, "<<\n", "\n>>");

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    fn sample_bodies() -> Vec<String> {
        vec![
            "a".repeat(100),
            (0..30).map(|i| format!("line {i}\n")).collect(),
            "résumé ✓ 日本語 ".repeat(12),
            format!("```\n{}\n```\n", "+ resource\n".repeat(20)),
            "\n".repeat(90),
        ]
    }

    #[test]
    fn test_short_body_is_untouched() {
        let long = "x".repeat(40);
        for body in ["", "hello", long.as_str()] {
            assert_eq!(SMALL.split(body), vec![body.to_string()]);
        }

        let body = "y".repeat(MAX_COMMENT_LENGTH);
        assert_eq!(CommentSplitter::default().split(&body), vec![body]);
    }

    #[test]
    fn test_segments_are_bounded() {
        for body in sample_bodies() {
            let segments = SMALL.split(&body);
            assert!(segments.len() > 1);

            for segment in &segments {
                assert!(char_len(segment) <= 40, "segment too long: {segment:?}");
            }
        }
    }

    #[test]
    fn test_segments_reconstruct_body() {
        for body in sample_bodies() {
            let segments = SMALL.split(&body);
            assert_eq!(SMALL.join(&segments), body);
        }
    }

    #[test]
    fn test_markers() {
        let segments = SMALL.split(&"a".repeat(100));

        assert!(!segments[0].starts_with("<<\n"));
        assert!(segments[0].ends_with("\n>>"));
        for segment in &segments[1..segments.len() - 1] {
            assert!(segment.starts_with("<<\n"));
            assert!(segment.ends_with("\n>>"));
        }
        let last = segments.last().unwrap();
        assert!(last.starts_with("<<\n"));
        assert!(!last.ends_with("\n>>"));
    }

    #[test]
    fn test_splits_on_line_boundaries() {
        let body: String = (0..30).map(|i| format!("line {i:02}\n")).collect();
        let segments = SMALL.split(&body);

        for segment in &segments[..segments.len() - 1] {
            let chunk = segment.strip_suffix("\n>>").unwrap();
            assert!(chunk.ends_with('\n'), "chunk should end on a line: {chunk:?}");
        }
    }

    #[test]
    fn test_is_deterministic() {
        let body: String = (0..50).map(|i| format!("row {i}\n")).collect();
        assert_eq!(SMALL.split(&body), SMALL.split(&body));
    }

    #[test]
    fn test_default_splitter() {
        let splitter = CommentSplitter::default();
        let body: String = (0..20_000).map(|i| format!("  + attribute_{i} = true\n")).collect();
        assert!(char_len(&body) > MAX_COMMENT_LENGTH);

        let segments = splitter.split(&body);
        assert!(segments.len() > 1);
        for segment in &segments {
            assert!(char_len(segment) <= MAX_COMMENT_LENGTH);
        }
        assert_eq!(splitter.join(&segments), body);
    }
}
