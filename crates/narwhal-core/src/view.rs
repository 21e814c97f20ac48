use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Which part of the story is visible: one domain, or every domain merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    All,
    Domain(usize),
}

impl View {
    pub fn is_all(self) -> bool {
        matches!(self, View::All)
    }

    pub fn domain_index(self) -> Option<usize> {
        match self {
            View::All => None,
            View::Domain(i) => Some(i),
        }
    }

    /// Falls back to [`View::All`] when the selected domain no longer exists.
    pub fn clamp(self, domain_count: usize) -> View {
        match self {
            View::Domain(i) if i >= domain_count => View::All,
            other => other,
        }
    }

    /// `All → 0 → 1 → … → last → All`. No-op with fewer than two domains.
    pub fn next(self, domain_count: usize) -> View {
        if domain_count < 2 {
            return self;
        }
        match self.clamp(domain_count) {
            View::All => View::Domain(0),
            View::Domain(i) if i + 1 >= domain_count => View::All,
            View::Domain(i) => View::Domain(i + 1),
        }
    }

    /// `All → last → … → 0 → last`. No-op with fewer than two domains.
    pub fn prev(self, domain_count: usize) -> View {
        if domain_count < 2 {
            return self;
        }
        match self.clamp(domain_count) {
            View::All | View::Domain(0) => View::Domain(domain_count - 1),
            View::Domain(i) => View::Domain(i - 1),
        }
    }

    /// Indices of the domains this view shows.
    pub fn visible_indices(self, domain_count: usize) -> std::ops::Range<usize> {
        match self {
            View::All => 0..domain_count,
            View::Domain(i) if i < domain_count => i..i + 1,
            View::Domain(_) => 0..0,
        }
    }
}

impl FromStr for View {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("all") || t == "-1" {
            return Ok(View::All);
        }
        t.parse::<usize>()
            .map(View::Domain)
            .map_err(|_| Error::InvalidView { raw: s.to_string() })
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::All => f.write_str("all"),
            View::Domain(i) => write!(f, "{i}"),
        }
    }
}

impl Serialize for View {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            View::All => serializer.serialize_str("all"),
            View::Domain(i) => serializer.serialize_u64(*i as u64),
        }
    }
}

impl<'de> Deserialize<'de> for View {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Index(usize),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Index(i) => Ok(View::Domain(i)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
