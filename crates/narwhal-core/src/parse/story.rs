use super::classify::{LineKind, classify_line};
use super::step::parse_step;
use crate::config::StoryConfig;
use crate::model::{Domain, Flow, ParseError, ParsedStory};

/// Compiles story text into domains, recovering from every malformed line.
///
/// Lines are processed top to bottom in one pass. This never fails: problems are collected in
/// [`ParsedStory::errors`] next to whatever could be salvaged.
pub fn parse_story(text: &str, config: &StoryConfig) -> ParsedStory {
    let mut builder = StoryBuilder::new(config);
    for (idx, raw) in text.split('\n').enumerate() {
        builder.line(idx + 1, raw);
    }
    builder.finish()
}

struct StoryBuilder<'c> {
    config: &'c StoryConfig,
    domains: Vec<Domain>,
    errors: Vec<ParseError>,
    /// Index into the last domain's flows.
    open_flow: Option<usize>,
    flow_counter: usize,
}

impl<'c> StoryBuilder<'c> {
    fn new(config: &'c StoryConfig) -> Self {
        Self {
            config,
            domains: Vec::new(),
            errors: Vec::new(),
            open_flow: None,
            flow_counter: 0,
        }
    }

    fn finish(self) -> ParsedStory {
        ParsedStory {
            domains: self.domains,
            errors: self.errors,
        }
    }

    fn error(&mut self, err: ParseError) {
        tracing::trace!(line = err.line, msg = %err.msg, "recovered story line");
        self.errors.push(err);
    }

    fn push_domain(&mut self, title: &str) {
        let color = self.config.domain_color(self.domains.len());
        self.domains.push(Domain::new(title, color));
        self.open_flow = None;
        self.flow_counter = 0;
    }

    /// The domain new content lands in, opening the implicit default domain when needed.
    fn current_domain(&mut self) -> &mut Domain {
        if self.domains.is_empty() {
            let title = self.config.default_domain_title().to_string();
            self.push_domain(&title);
        }
        let last = self.domains.len() - 1;
        &mut self.domains[last]
    }

    fn line(&mut self, line_no: usize, raw: &str) {
        let line = raw.trim();
        let kind = {
            let known = self
                .domains
                .last()
                .map(|d| d.actor_names())
                .unwrap_or_default();
            classify_line(line, &known)
        };

        match kind {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::DomainHeader { title } => self.push_domain(title),
            LineKind::Note(note) => self.current_domain().notes.push(note),
            LineKind::Actor(actor) => {
                let domain = self.current_domain();
                if domain.actor(&actor.name).is_some() {
                    let hint = format!("@{} is already declared", actor.name);
                    self.error(ParseError::new(line_no, "Duplicate actor", hint));
                    return;
                }
                domain.participants.push(actor);
            }
            LineKind::MalformedActor => {
                self.current_domain();
                self.error(ParseError::new(line_no, "Invalid actor", "@Name (icon)"));
            }
            LineKind::FlowHeader { title } => {
                let title = if title.is_empty() { "Untitled" } else { title };
                // Opening the implicit domain resets the counter, so do it first.
                self.current_domain();
                self.flow_counter += 1;
                let number = self.flow_counter;
                let flows = &mut self.current_domain().flows;
                flows.push(Flow {
                    number,
                    title: title.to_string(),
                    steps: Vec::new(),
                });
                let idx = flows.len() - 1;
                self.open_flow = Some(idx);
            }
            LineKind::Prose => {
                self.current_domain();
            }
            LineKind::StepCandidate => self.step(line_no, line),
        }
    }

    fn step(&mut self, line_no: usize, line: &str) {
        let Some(flow_idx) = self.open_flow else {
            self.error(ParseError::new(
                line_no,
                "Step outside flow",
                "Add ## Flow first",
            ));
            return;
        };

        let mut errors = Vec::new();
        let step = {
            let domain = self.current_domain();
            let names = domain.actor_names();
            parse_step(line, &names, line_no, &mut errors)
        };
        for err in errors {
            self.error(err);
        }
        if let Some(step) = step {
            self.current_domain().flows[flow_idx].steps.push(step);
        }
    }
}
