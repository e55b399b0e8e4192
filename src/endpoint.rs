use serde::{Deserialize, Serialize};

/// Which end of an entity a point names.
///
/// An interval entity contributes a `Start` and an `End` endpoint; an
/// instant entity contributes a single `Instant` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Start,
    End,
    Instant,
}

impl Kind {
    /// The word this kind renders as in a canonical endpoint name.
    pub fn word(&self) -> &'static str {
        match self {
            Kind::Start => "start",
            Kind::End => "end",
            Kind::Instant => "instant",
        }
    }

    /// Parse the leading word of a canonical endpoint name.
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "start" => Some(Kind::Start),
            "end" => Some(Kind::End),
            "instant" => Some(Kind::Instant),
            _ => None,
        }
    }
}

/// A point in time: one end of an interval entity, or an instant entity.
///
/// Its canonical identity is the integer position it occupies in the
/// endpoint sequence built by [`crate::engine::Game::new`]; its canonical
/// *name* is `"<kind> <entity_id>"`, the string form exchanged with
/// callers and used as the key for relation canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub kind: Kind,
    pub entity_id: String,
    pub text: String,
    pub offsets: (usize, usize),
}

impl Endpoint {
    pub fn new(kind: Kind, entity_id: impl Into<String>, text: impl Into<String>, offsets: (usize, usize)) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            text: text.into(),
            offsets,
        }
    }

    /// `"<kind> <entity_id>"`, the string identity shared with [`crate::relation::PointRelation`].
    pub fn canonical_name(&self) -> String {
        format!("{} {}", self.kind.word(), self.entity_id)
    }

    /// `"<kind> <entity_text>"`, the human-readable label returned in observations.
    pub fn label(&self) -> String {
        format!("{} {}", self.kind.word(), self.text)
    }
}
