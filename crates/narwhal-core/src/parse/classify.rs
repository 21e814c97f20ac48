use super::lexer::{Cursor, is_word_char};
use crate::model::{ActorDecl, Note, NoteKind};

/// Category of one trimmed story line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    DomainHeader { title: &'a str },
    Note(Note),
    Actor(ActorDecl),
    /// A line starting with `@` that does not follow `@Name (icon) "annotation"`.
    MalformedActor,
    FlowHeader { title: &'a str },
    Comment,
    /// Mentions at least one known actor name; handed to the step grammar.
    StepCandidate,
    /// Free text that mentions no known actor. Ignored.
    Prose,
}

/// Classifies a single line against the actors known so far in the current domain.
///
/// Dispatch order matters: a `#` header wins over everything, notes are checked before actor
/// declarations, and `//` comments are only recognized after the header forms.
pub fn classify_line<'a>(line: &'a str, known_actors: &[&str]) -> LineKind<'a> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    if let Some(rest) = line.strip_prefix('#') {
        if rest.chars().next().is_some_and(|c| c != '#') {
            return LineKind::DomainHeader { title: rest.trim() };
        }
    }

    if let Some(rest) = line.strip_prefix('>') {
        return match parse_note(rest) {
            Some(note) => LineKind::Note(note),
            None => LineKind::Blank,
        };
    }

    if let Some(rest) = line.strip_prefix('@') {
        return match parse_actor_decl(rest) {
            Some(actor) => LineKind::Actor(actor),
            None => LineKind::MalformedActor,
        };
    }

    if line.starts_with("##") {
        return LineKind::FlowHeader {
            title: line.trim_start_matches('#').trim(),
        };
    }

    if line.starts_with("//") {
        return LineKind::Comment;
    }

    if mentions_any_actor(line, known_actors) {
        LineKind::StepCandidate
    } else {
        LineKind::Prose
    }
}

/// True when the lowercased line contains any lowercased actor name.
pub fn mentions_any_actor(line: &str, known_actors: &[&str]) -> bool {
    let lower = line.to_lowercase();
    known_actors
        .iter()
        .filter(|name| !name.is_empty())
        .any(|name| lower.contains(&name.to_lowercase()))
}

/// Parses the text after `>`. Returns `None` for an empty note.
fn parse_note(body: &str) -> Option<Note> {
    let text = body.trim();
    if text.is_empty() {
        return None;
    }

    if let Some((tag, content)) = split_note_tag(text) {
        if let Some(kind) = NoteKind::from_tag(tag) {
            return Some(Note {
                kind,
                content: content.to_string(),
            });
        }
    }

    Some(Note {
        kind: NoteKind::Note,
        content: text.to_string(),
    })
}

/// `[tag] content` where tag is `word` or `word-word` and content is non-empty.
fn split_note_tag(text: &str) -> Option<(&str, &str)> {
    let mut cur = Cursor::new(text);
    if !cur.eat('[') {
        return None;
    }
    let tag_start = text.len() - cur.rest().len();
    if cur.eat_while(is_word_char).is_empty() {
        return None;
    }
    if cur.eat('-') && cur.eat_while(is_word_char).is_empty() {
        return None;
    }
    let tag_end = text.len() - cur.rest().len();
    if !cur.eat(']') {
        return None;
    }
    cur.skip_ws();
    let content = cur.rest().trim();
    if content.is_empty() {
        return None;
    }
    Some((&text[tag_start..tag_end], content))
}

/// Parses `Name (icon) "annotation"` (the text after `@`).
///
/// The name is the shortest prefix for which the remainder is a valid `(icon)` group followed
/// by an optional non-empty quoted annotation, so names may themselves contain parentheses:
/// `@Bank (EU) (person)` declares `Bank (EU)`.
pub fn parse_actor_decl(body: &str) -> Option<ActorDecl> {
    for (open_at, _) in body.match_indices('(') {
        let name = body[..open_at].trim();
        if name.is_empty() {
            continue;
        }

        let mut cur = Cursor::at(body, open_at);
        cur.bump();
        let icon = cur.eat_while(is_word_char);
        if icon.is_empty() || !cur.eat(')') {
            continue;
        }
        cur.skip_ws();
        if cur.is_eof() {
            return Some(ActorDecl {
                name: name.to_string(),
                icon: icon.to_string(),
                annotation: None,
            });
        }

        let Some(annotation) = cur
            .rest()
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .filter(|s| !s.is_empty())
        else {
            continue;
        };
        return Some(ActorDecl {
            name: name.to_string(),
            icon: icon.to_string(),
            annotation: Some(annotation.to_string()),
        });
    }
    None
}
