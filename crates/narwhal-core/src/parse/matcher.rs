use super::lexer::is_word_char;

/// Greedy, case-insensitive actor-name matcher anchored at either end of a text.
///
/// Candidates are tried longest first (by char count, ties keep declaration order) so that
/// `"A B"` wins over `"A"` on `"A B meets A"`. A match must not split a word: when the matched
/// name ends (or starts, for suffix matches) with a word character, the neighbouring character
/// in the text must not be one.
#[derive(Debug, Clone)]
pub struct ActorNameMatcher<'a> {
    names: Vec<&'a str>,
}

/// A successful anchor match: the declared name plus the byte range it covers in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatch<'a> {
    pub name: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> ActorNameMatcher<'a> {
    pub fn new(names: &[&'a str]) -> Self {
        let mut names = names
            .iter()
            .copied()
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>();
        names.sort_by_key(|n| std::cmp::Reverse(n.chars().count()));
        Self { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn match_prefix(&self, text: &str) -> Option<NameMatch<'a>> {
        self.names.iter().find_map(|&name| {
            let end = prefix_len_ignore_case(text, name)?;
            let last = text[..end].chars().next_back()?;
            let next = text[end..].chars().next();
            if splits_word(last, next) {
                return None;
            }
            Some(NameMatch {
                name,
                start: 0,
                end,
            })
        })
    }

    pub fn match_suffix(&self, text: &str) -> Option<NameMatch<'a>> {
        self.names.iter().find_map(|&name| {
            let start = suffix_start_ignore_case(text, name)?;
            let first = text[start..].chars().next()?;
            let prev = text[..start].chars().next_back();
            if splits_word(first, prev) {
                return None;
            }
            Some(NameMatch {
                name,
                start,
                end: text.len(),
            })
        })
    }
}

fn splits_word(edge: char, neighbour: Option<char>) -> bool {
    neighbour.is_some_and(|n| is_word_char(edge) && is_word_char(n))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte length of the text prefix equal (case-insensitively) to `name`.
fn prefix_len_ignore_case(text: &str, name: &str) -> Option<usize> {
    let mut text_chars = text.char_indices();
    for n in name.chars() {
        let (_, t) = text_chars.next()?;
        if !chars_eq_ignore_case(t, n) {
            return None;
        }
    }
    Some(text_chars.next().map_or(text.len(), |(i, _)| i))
}

/// Byte offset where a suffix equal (case-insensitively) to `name` starts.
fn suffix_start_ignore_case(text: &str, name: &str) -> Option<usize> {
    let mut text_chars = text.char_indices().rev();
    let mut start = text.len();
    for n in name.chars().rev() {
        let (i, t) = text_chars.next()?;
        if !chars_eq_ignore_case(t, n) {
            return None;
        }
        start = i;
    }
    Some(start)
}
