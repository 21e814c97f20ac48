use crate::parse::{LineKind, MSG_START_NOT_FOUND, classify_line, parse_actor_decl, parse_step};
use crate::*;
use serde_json::json;

fn parse(text: &str) -> ParsedStory {
    Engine::new().parse_story(text)
}

#[test]
fn parse_story_basic_domain_flow_step() {
    let story = parse("# D\n@A (person)\n@B (computer)\n## F\nA does B\n");
    assert!(story.is_clean(), "{:?}", story.errors);
    assert_eq!(story.domains.len(), 1);
    let domain = &story.domains[0];
    assert_eq!(domain.title, "D");
    assert_eq!(domain.flows.len(), 1);
    assert_eq!(domain.flows[0].title, "F");
    assert_eq!(domain.flows[0].number, 1);
    assert_eq!(
        serde_json::to_value(&domain.flows[0].steps).unwrap(),
        json!([{
            "from": "A",
            "action": "does",
            "to": "B",
            "workObject": null,
            "annotation": null
        }])
    );
}

#[test]
fn parse_story_serializes_like_the_compiler_contract() {
    let story = parse("# Shop\n> [risk] Stock may run out\n@Customer (person) \"walk-in\"\n");
    assert_eq!(
        serde_json::to_value(&story).unwrap(),
        json!({
            "domains": [{
                "title": "Shop",
                "notes": [{ "type": "risk", "content": "Stock may run out" }],
                "participants": [
                    { "name": "Customer", "icon": "person", "annotation": "walk-in" }
                ],
                "flows": [],
                "color": "#6366f1"
            }],
            "errors": []
        })
    );
}

#[test]
fn parse_story_prefers_longest_actor_name() {
    let story = parse("# D\n@A (person)\n@A B (person)\n## F\nA B meets A\n");
    assert!(story.is_clean(), "{:?}", story.errors);
    let step = &story.domains[0].flows[0].steps[0];
    assert_eq!(step.from, "A B");
    assert_eq!(step.action, "meets");
    assert_eq!(step.to, "A");
}

#[test]
fn parse_story_strips_work_object_and_annotation() {
    let story = parse(
        "@Customer (person)\n@Clerk (person)\n## Order\nCustomer hands over { order form } to Clerk\nCustomer pays Clerk {cash} \"exact change\"\n",
    );
    assert!(story.is_clean(), "{:?}", story.errors);
    let steps = &story.domains[0].flows[0].steps;
    assert_eq!(steps.len(), 2);

    // A work object in the middle of the line is not a trailing tag, so it stays in the action.
    assert_eq!(steps[0].action, "hands over { order form } to");
    assert_eq!(steps[0].work_object, None);

    assert_eq!(steps[1].action, "pays");
    assert_eq!(steps[1].work_object.as_deref(), Some("cash"));
    assert_eq!(steps[1].annotation.as_deref(), Some("exact change"));
}

#[test]
fn parse_story_matches_actor_names_case_insensitively() {
    let story = parse("@Customer (person)\n@Bank (dns)\n## Pay\ncustomer wires money to BANK\n");
    assert!(story.is_clean(), "{:?}", story.errors);
    let step = &story.domains[0].flows[0].steps[0];
    assert_eq!(step.from, "Customer");
    assert_eq!(step.to, "Bank");
    assert_eq!(step.action, "wires money to");
}

#[test]
fn parse_story_allows_empty_action() {
    let story = parse("@A (person)\n@B (person)\n## F\nA B\n");
    assert!(story.is_clean(), "{:?}", story.errors);
    let step = &story.domains[0].flows[0].steps[0];
    assert_eq!((step.from.as_str(), step.action.as_str(), step.to.as_str()), ("A", "", "B"));
}

#[test]
fn parse_story_creates_implicit_domain() {
    let story = parse("@A (person)\n## F\nA calls A\n");
    assert_eq!(story.domains.len(), 1);
    assert_eq!(story.domains[0].title, "Domain Story");
    assert_eq!(story.domains[0].color, "#6366f1");
}

#[test]
fn parse_story_comments_and_blanks_do_not_open_a_domain() {
    let story = parse("\n// nothing yet\n   \n");
    assert!(story.domains.is_empty());
    assert!(story.is_clean());
}

#[test]
fn parse_story_numbers_flows_per_domain() {
    let story = parse("# One\n## a\n## b\n# Two\n##\n");
    let numbers = story
        .domains
        .iter()
        .map(|d| d.flows.iter().map(|f| (f.number, f.title.as_str())).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    assert_eq!(
        numbers,
        vec![vec![(1, "a"), (2, "b")], vec![(1, "Untitled")]]
    );
    assert_eq!(story.domains[1].color, "#10b981");
}

#[test]
fn parse_story_reports_step_outside_flow() {
    let story = parse("# D\n@A (person)\n@B (person)\nA does B\n");
    assert_eq!(story.errors.len(), 1);
    assert_eq!(story.errors[0].line, 4);
    assert_eq!(story.errors[0].msg, "Step outside flow");
    assert_eq!(story.step_count(), 0);
}

#[test]
fn parse_story_reports_invalid_actor_and_keeps_going() {
    let story = parse("# D\n@Broken\n@A (person)\n## F\nA pings A\n");
    assert_eq!(story.errors.len(), 1);
    assert_eq!(
        story.errors[0],
        ParseError::new(2, "Invalid actor", "@Name (icon)")
    );
    assert_eq!(story.domains[0].participants.len(), 1);
    assert_eq!(story.step_count(), 1);
}

#[test]
fn parse_story_rejects_duplicate_actor_case_insensitively() {
    let story = parse("@Clerk (person)\n@clerk (computer)\n");
    assert_eq!(story.errors.len(), 1);
    assert_eq!(story.errors[0].msg, "Duplicate actor");
    assert_eq!(story.domains[0].participants.len(), 1);
    assert_eq!(story.domains[0].participants[0].icon, "person");
}

#[test]
fn parse_story_reports_end_actor_not_found() {
    let story = parse("@Alice (person)\n## F\nAlice waves at nobody\n");
    assert_eq!(story.errors.len(), 1);
    assert_eq!(story.errors[0].msg, "End actor not found");
    assert_eq!(story.errors[0].hint, "Actor1 action Alice");
    assert_eq!(story.step_count(), 0);
}

#[test]
fn parse_story_reports_start_actor_not_found() {
    let story = parse("@Bob (person)\n## F\nthen Bob\n");
    assert_eq!(story.errors.len(), 1);
    assert_eq!(story.errors[0].msg, "Start actor not found");
}

#[test]
fn parse_story_ignores_prose_without_known_actors() {
    let story = parse("# D\n@Clerk (person)\n## F\nSome narrative text here.\n");
    assert!(story.is_clean());
    assert_eq!(story.step_count(), 0);
}

#[test]
fn parse_step_unknown_start_without_actors_yields_one_error() {
    let mut errors = Vec::new();
    let step = parse_step("Unknown start", &[], 7, &mut errors);
    assert!(step.is_none());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].msg, MSG_START_NOT_FOUND);
    assert_eq!(errors[0].line, 7);
}

#[test]
fn parse_step_reports_empty_step() {
    let mut errors = Vec::new();
    let step = parse_step("{letter} \"urgent\"", &["A"], 3, &mut errors);
    assert!(step.is_none());
    assert_eq!(errors[0].msg, "Empty step");
    assert_eq!(errors[0].hint, "Actor1 action Actor2");
}

#[test]
fn parse_step_resolves_to_declared_actors() {
    let names = ["Ann", "Ben", "Cara"];
    for line in ["Ann Ben", "Ann greets Cara", "Cara tells Ann Ben", "ben asks ann"] {
        let mut errors = Vec::new();
        let step = parse_step(line, &names, 1, &mut errors).unwrap();
        assert!(errors.is_empty());
        assert!(names.contains(&step.from.as_str()));
        assert!(names.contains(&step.to.as_str()));
        assert_ne!(step.action, step.from, "{line}");
        assert_ne!(step.action, step.to, "{line}");
    }
}

#[test]
fn classify_line_dispatch_order() {
    assert_eq!(classify_line("   ", &[]), LineKind::Blank);
    assert_eq!(
        classify_line("# Shop", &[]),
        LineKind::DomainHeader { title: "Shop" }
    );
    assert_eq!(
        classify_line("### Deep", &[]),
        LineKind::FlowHeader { title: "Deep" }
    );
    assert_eq!(classify_line("#", &[]), LineKind::Prose);
    assert_eq!(classify_line("// A does B", &["A", "B"]), LineKind::Comment);
    assert_eq!(classify_line("A does B", &["a"]), LineKind::StepCandidate);
    assert_eq!(classify_line("weather report", &["a b"]), LineKind::Prose);
    assert_eq!(classify_line("@", &[]), LineKind::MalformedActor);
    assert_eq!(classify_line(">", &[]), LineKind::Blank);
}

#[test]
fn classify_line_note_tags() {
    let LineKind::Note(note) = classify_line("> [User-Story] As a clerk", &[]) else {
        panic!("expected a note");
    };
    assert_eq!(note.kind, NoteKind::UserStory);
    assert_eq!(note.content, "As a clerk");

    let LineKind::Note(note) = classify_line("> [todo] later", &[]) else {
        panic!("expected a note");
    };
    assert_eq!(note.kind, NoteKind::Note);
    assert_eq!(note.content, "[todo] later");
}

#[test]
fn parse_actor_decl_grammar() {
    let actor = parse_actor_decl("Bank (EU) (dns) \"regulated\"").unwrap();
    assert_eq!(actor.name, "Bank (EU)");
    assert_eq!(actor.icon, "dns");
    assert_eq!(actor.annotation.as_deref(), Some("regulated"));
    assert_eq!(actor.kind(), ActorKind::System);

    let actor = parse_actor_decl("Clerk(person)").unwrap();
    assert_eq!(actor.name, "Clerk");
    assert_eq!(actor.kind(), ActorKind::Person);

    assert!(parse_actor_decl("Clerk person").is_none());
    assert!(parse_actor_decl("(person)").is_none());
    assert!(parse_actor_decl("Clerk (person) trailing").is_none());
    assert!(parse_actor_decl("Clerk (two words)").is_none());
    assert_eq!(
        parse_actor_decl("Invoice (description)").unwrap().kind(),
        ActorKind::Work
    );
}

#[test]
fn parse_error_display_includes_hint() {
    let err = ParseError::new(4, "Step outside flow", "Add ## Flow first");
    assert_eq!(err.to_string(), "Line 4: Step outside flow (Add ## Flow first)");
}

#[test]
fn parse_story_is_idempotent() {
    let text = "# D\n@A (person)\n@B (computer)\n## F\nA does B {x}\nB answers A\n";
    assert_eq!(parse(text), parse(text));
}
