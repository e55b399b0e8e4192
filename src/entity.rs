use serde::{Deserialize, Serialize};

/// Whether an entity is a bounded interval or a zero-width instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Interval,
    Instant,
}

impl Default for EntityKind {
    fn default() -> Self {
        EntityKind::Interval
    }
}

/// One tagged span in the source text.
///
/// `id` is the caller-supplied identifier before [`crate::engine::Game::new`]
/// remaps it into the dense `e0, e1, …` namespace (§4.5).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub text: String,
    pub offsets: (usize, usize),
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: impl Into<String>, text: impl Into<String>, offsets: (usize, usize), kind: EntityKind) -> Self {
        Self { id: id.into(), text: text.into(), offsets, kind }
    }

    pub fn is_interval(&self) -> bool {
        matches!(self.kind, EntityKind::Interval)
    }
}

/// Sort entities by their starting offset, the order that defines entity
/// traversal throughout the engine (endpoint sequence, `Timeline::sort`,
/// board indexing).
pub fn sort_by_offset(entities: &mut [Entity]) {
    entities.sort_by_key(|e| e.offsets.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kind_is_interval() {
        assert_eq!(EntityKind::default(), EntityKind::Interval);
    }

    #[test]
    fn sorts_by_start_offset() {
        let mut entities = vec![
            Entity::new("b", "second", (10, 20), EntityKind::Interval),
            Entity::new("a", "first", (0, 5), EntityKind::Interval),
        ];
        sort_by_offset(&mut entities);
        assert_eq!(entities[0].id, "a");
        assert_eq!(entities[1].id, "b");
    }
}
