use crate::entity::{sort_by_offset, Entity};
use crate::relation::PointRelation;
use std::collections::HashMap;

/// A text annotated with entities and the point relations asserted over
/// their endpoints. The game engine holds exactly two: an immutable
/// ground truth and a mutable prediction (§3 Lifecycle).
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub entities: Vec<Entity>,
    pub relations: Vec<PointRelation>,
}

impl Document {
    pub fn new(text: impl Into<String>, entities: Vec<Entity>, relations: Vec<PointRelation>) -> Self {
        Self { text: text.into(), entities, relations }
    }

    /// Sort entities by starting offset, the traversal order used
    /// throughout the engine.
    pub fn sorted_by_offset(mut self) -> Self {
        sort_by_offset(&mut self.entities);
        self
    }

    /// Dense `entity_id -> position` map in the document's entity order,
    /// the `entity_order` consumed by [`crate::timeline::Timeline::sort`].
    pub fn entity_order(&self) -> HashMap<String, usize> {
        self.entities.iter().enumerate().map(|(i, e)| (e.id.clone(), i)).collect()
    }

    /// Insert `<eK>`/`</eK>` tags around each entity's surface span, in
    /// offset order, walking the original text monotonically so later
    /// offsets are never computed against already-tagged text (§6).
    pub fn tagged_context(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0usize;
        for (k, entity) in self.entities.iter().enumerate() {
            let (start, end) = entity.offsets;
            out.push_str(&self.text[cursor..start]);
            out.push_str(&format!("<e{k}>"));
            out.push_str(&self.text[start..end]);
            out.push_str(&format!("</e{k}>"));
            cursor = end;
        }
        out.push_str(&self.text[cursor..]);
        out
    }
}

/// Remap every entity's `id` to the dense namespace `e0, e1, …` in
/// first-appearance (i.e. already offset-sorted) order, rewriting the
/// entity-id portion of every relation's endpoint names to match.
///
/// Returns the old-id to new-id map, mainly useful for tests and callers
/// that need to translate externally-supplied actions.
pub fn remap_entity_ids(entities: &mut [Entity], relations: &mut [PointRelation]) -> HashMap<String, String> {
    let remap: HashMap<String, String> =
        entities.iter().enumerate().map(|(i, e)| (e.id.clone(), format!("e{i}"))).collect();
    for entity in entities.iter_mut() {
        entity.id = remap[&entity.id].clone();
    }
    for r in relations.iter_mut() {
        *r = rewrite_relation_entity_ids(r, &remap);
    }
    remap
}

fn rewrite_relation_entity_ids(r: &PointRelation, remap: &HashMap<String, String>) -> PointRelation {
    let source = rewrite_endpoint_entity_id(r.source(), remap);
    let target = rewrite_endpoint_entity_id(r.target(), remap);
    PointRelation::new(source, target, r.rel()).expect("rewriting a valid endpoint name preserves its kind prefix")
}

fn rewrite_endpoint_entity_id(name: &str, remap: &HashMap<String, String>) -> String {
    let mut parts = name.splitn(2, ' ');
    let kind = parts.next().unwrap_or_default();
    let id = parts.next().unwrap_or_default();
    match remap.get(id) {
        Some(new_id) => format!("{kind} {new_id}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::relation::Rel;

    #[test]
    fn remap_renames_entities_and_relations() {
        let mut entities = vec![
            Entity::new("b", "second", (10, 20), EntityKind::Interval),
            Entity::new("a", "first", (0, 5), EntityKind::Interval),
        ];
        sort_by_offset(&mut entities);
        let mut relations = vec![PointRelation::new("start a", "start b", Rel::Lt).unwrap()];
        let remap = remap_entity_ids(&mut entities, &mut relations);
        assert_eq!(remap.get("a"), Some(&"e0".to_string()));
        assert_eq!(remap.get("b"), Some(&"e1".to_string()));
        assert_eq!(entities[0].id, "e0");
        assert_eq!(entities[1].id, "e1");
        assert_eq!(relations[0].source(), "start e0");
        assert_eq!(relations[0].target(), "start e1");
    }

    #[test]
    fn tagged_context_inserts_around_offsets() {
        let doc = Document::new(
            "Alice met Bob",
            vec![
                Entity::new("e0", "Alice", (0, 5), EntityKind::Instant),
                Entity::new("e1", "Bob", (10, 13), EntityKind::Instant),
            ],
            vec![],
        );
        assert_eq!(doc.tagged_context(), "<e0>Alice</e0> met <e1>Bob</e1>");
    }
}
