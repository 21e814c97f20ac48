/// Char-boundary-safe cursor over a single story line.
///
/// All grammar helpers in this module work on already-trimmed lines, so the cursor never
/// crosses a newline.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'input> {
    input: &'input str,
    pos: usize,
}

impl<'input> Cursor<'input> {
    pub(crate) fn new(input: &'input str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn at(input: &'input str, pos: usize) -> Self {
        debug_assert!(input.is_char_boundary(pos));
        Self { input, pos }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            return true;
        }
        false
    }

    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'input str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.input[start..self.pos]
    }

    pub(crate) fn skip_ws(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    pub(crate) fn rest(&self) -> &'input str {
        &self.input[self.pos..]
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

/// Word characters for boundary checks: Unicode alphanumerics and `_`.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits a trailing `<open>content<close>` group off `line`.
///
/// The group must be the last non-whitespace text and its content must be non-empty and free of
/// `close`. When `open != close` the leftmost `open` after the last inner `close` starts the
/// group, so `{a{b}` yields `a{b`. Returns the raw content and the text before the group
/// (trimmed).
pub(crate) fn strip_trailing_group(line: &str, open: char, close: char) -> Option<(&str, &str)> {
    let body = line.trim_end().strip_suffix(close)?;
    let open_at = if open == close {
        body.rfind(open)?
    } else {
        let floor = body.rfind(close).map_or(0, |i| i + close.len_utf8());
        floor + body[floor..].find(open)?
    };
    let content = &body[open_at + open.len_utf8()..];
    if content.is_empty() {
        return None;
    }
    Some((content, body[..open_at].trim()))
}
