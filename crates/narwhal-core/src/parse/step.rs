use super::lexer::strip_trailing_group;
use super::matcher::ActorNameMatcher;
use crate::model::{ParseError, Step};

pub const MSG_EMPTY_STEP: &str = "Empty step";
pub const MSG_START_NOT_FOUND: &str = "Start actor not found";
pub const MSG_END_NOT_FOUND: &str = "End actor not found";

/// Parses `From action To {work object} "annotation"` against the declared actor names.
///
/// On failure exactly one error is appended to `errors` and `None` is returned; an unresolved
/// name is never carried into the model as literal text.
pub fn parse_step(
    line: &str,
    actor_names: &[&str],
    line_no: usize,
    errors: &mut Vec<ParseError>,
) -> Option<Step> {
    let mut rest = line.trim();

    let mut annotation = None;
    if let Some((content, before)) = strip_trailing_group(rest, '"', '"') {
        annotation = Some(content.to_string());
        rest = before;
    }

    let mut work_object = None;
    if let Some((content, before)) = strip_trailing_group(rest, '{', '}') {
        let content = content.trim();
        work_object = (!content.is_empty()).then(|| content.to_string());
        rest = before;
    }

    if rest.is_empty() {
        errors.push(ParseError::new(
            line_no,
            MSG_EMPTY_STEP,
            "Actor1 action Actor2",
        ));
        return None;
    }

    let matcher = ActorNameMatcher::new(actor_names);

    let Some(from) = matcher.match_prefix(rest) else {
        errors.push(ParseError::new(
            line_no,
            MSG_START_NOT_FOUND,
            "Define with @ActorName (icon)",
        ));
        return None;
    };
    let remaining = rest[from.end..].trim();

    let Some(to) = matcher.match_suffix(remaining) else {
        errors.push(ParseError::new(
            line_no,
            MSG_END_NOT_FOUND,
            format!("Actor1 action {}", from.name),
        ));
        return None;
    };
    let action = remaining[..to.start].trim();

    Some(Step {
        from: from.name.to_string(),
        action: action.to_string(),
        to: to.name.to_string(),
        work_object,
        annotation,
    })
}
