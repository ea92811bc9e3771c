/// Byte offsets of the start of every line in a document, so that
/// `graphql_parser` positions (1-based line, 1-based char column) can be
/// mapped back onto the original text.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}
impl LineIndex {
    pub(crate) fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            memchr::memchr_iter(b'\n', content.as_bytes()).map(|idx| idx + 1),
        );
        Self { line_starts }
    }

    pub(crate) fn offset_of(&self, content: &str, line: usize, column: usize) -> Option<usize> {
        let line_start = *self.line_starts.get(line.checked_sub(1)?)?;
        let line_text = &content[line_start..];
        let col_offset = line_text.char_indices()
            .nth(column.checked_sub(1)?)
            .map(|(idx, _)| idx)?;
        Some(line_start + col_offset)
    }
}

/// Returns the exact text of the executable definition starting at byte
/// offset `start`: everything up to and including the `}` that closes its
/// top-level selection set.
///
/// Braces inside parentheses (object literals in arguments or variable
/// defaults), strings, block strings and comments are not counted.
pub(crate) fn definition_text(content: &str, start: usize) -> Option<&str> {
    let bytes = content.as_bytes();
    let mut idx = start;
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    while idx < bytes.len() {
        match bytes[idx] {
            b'#' => {
                idx = memchr::memchr(b'\n', &bytes[idx..])
                    .map_or(bytes.len(), |nl| idx + nl);
                continue;
            },

            b'"' if bytes[idx..].starts_with(b"\"\"\"") => {
                idx = skip_block_string(bytes, idx + 3)?;
                continue;
            },

            b'"' => {
                idx = skip_string(bytes, idx + 1)?;
                continue;
            },

            b'(' => paren_depth += 1,
            b')' => paren_depth = paren_depth.saturating_sub(1),
            b'{' if paren_depth == 0 => brace_depth += 1,
            b'}' if paren_depth == 0 => {
                brace_depth = brace_depth.checked_sub(1)?;
                if brace_depth == 0 {
                    return content.get(start..=idx);
                }
            },

            _ => (),
        }
        idx += 1;
    }

    None
}

/// Returns the offset just past the closing `"""`.
fn skip_block_string(bytes: &[u8], mut idx: usize) -> Option<usize> {
    while idx < bytes.len() {
        if bytes[idx..].starts_with(b"\\\"\"\"") {
            idx += 4;
        } else if bytes[idx..].starts_with(b"\"\"\"") {
            return Some(idx + 3);
        } else {
            idx += 1;
        }
    }
    None
}

/// Returns the offset just past the closing `"`.
fn skip_string(bytes: &[u8], mut idx: usize) -> Option<usize> {
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b'"' => return Some(idx + 1),
            b'\n' => return None,
            _ => idx += 1,
        }
    }
    None
}
