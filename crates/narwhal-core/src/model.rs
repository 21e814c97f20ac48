use serde::{Deserialize, Serialize};

/// Result of compiling a story text: best-effort domains plus every recovered line error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedStory {
    pub domains: Vec<Domain>,
    pub errors: Vec<ParseError>,
}

impl ParsedStory {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn step_count(&self) -> usize {
        self.domains
            .iter()
            .flat_map(|d| d.flows.iter())
            .map(|f| f.steps.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    /// 1-based source line.
    pub line: usize,
    pub msg: String,
    pub hint: String,
}

impl ParseError {
    pub fn new(line: usize, msg: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            line,
            msg: msg.into(),
            hint: hint.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {} ({})", self.line, self.msg, self.hint)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub title: String,
    pub notes: Vec<Note>,
    pub participants: Vec<ActorDecl>,
    pub flows: Vec<Flow>,
    pub color: String,
}

impl Domain {
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: Vec::new(),
            participants: Vec::new(),
            flows: Vec::new(),
            color: color.into(),
        }
    }

    /// Case-insensitive lookup of a declared actor.
    pub fn actor(&self, name: &str) -> Option<&ActorDecl> {
        let needle = name.to_lowercase();
        self.participants
            .iter()
            .find(|p| p.name.to_lowercase() == needle)
    }

    pub fn actor_names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteKind {
    UserStory,
    Requirement,
    Assumption,
    Risk,
    #[default]
    Note,
}

impl NoteKind {
    /// Recognizes a bracketed note tag, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "user-story" => Some(Self::UserStory),
            "requirement" => Some(Self::Requirement),
            "assumption" => Some(Self::Assumption),
            "risk" => Some(Self::Risk),
            "note" => Some(Self::Note),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::UserStory => "User Story",
            Self::Requirement => "Requirement",
            Self::Assumption => "Assumption",
            Self::Risk => "Risk",
            Self::Note => "Note",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorDecl {
    pub name: String,
    pub icon: String,
    pub annotation: Option<String>,
}

impl ActorDecl {
    pub fn kind(&self) -> ActorKind {
        ActorKind::from_icon(&self.icon)
    }
}

/// Coarse actor category derived from its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Person,
    System,
    Work,
}

const PEOPLE_ICONS: &[&str] = &[
    "person",
    "group",
    "groups",
    "support_agent",
    "engineering",
    "supervisor_account",
    "badge",
];

const TECH_ICONS: &[&str] = &[
    "computer",
    "dns",
    "storage",
    "cloud",
    "api",
    "database",
    "terminal",
    "settings",
    "dashboard",
    "archive",
];

impl ActorKind {
    pub fn from_icon(icon: &str) -> Self {
        if PEOPLE_ICONS.contains(&icon) {
            Self::Person
        } else if TECH_ICONS.contains(&icon) {
            Self::System
        } else {
            Self::Work
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    /// 1-based, restarts at 1 in every domain.
    pub number: usize,
    pub title: String,
    pub steps: Vec<Step>,
}

/// One actor-to-actor interaction.
///
/// Routing geometry is not stored here; see [`crate::compose::ControlPoints`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub from: String,
    pub action: String,
    pub to: String,
    pub work_object: Option<String>,
    pub annotation: Option<String>,
}
