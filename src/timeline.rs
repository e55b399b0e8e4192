use crate::relation::{PointRelation, Rel};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::Dfs;
use std::collections::{HashMap, HashSet};

/// A set of point relations, closed and checked for consistency on demand.
///
/// `Timeline` is deliberately a thin wrapper over a `HashSet<PointRelation>`:
/// `PointRelation`'s equality and hashing are defined on its canonical
/// (lex-sorted) form regardless of physical field order, so set membership
/// and the conflict check in [`Timeline::is_valid`] reduce to ordinary
/// `HashSet` operations even after [`Timeline::sort`] has physically
/// reoriented some relations for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    relations: HashSet<PointRelation>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relations(&self) -> &HashSet<PointRelation> {
        &self.relations
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn contains(&self, r: &PointRelation) -> bool {
        self.relations.contains(r)
    }

    /// Insert `r` into the set. Does not recompute anything; callers ask
    /// for [`Timeline::closure`] when they need the derived set.
    pub fn add(&mut self, r: PointRelation) {
        self.relations.insert(r);
    }

    /// The transitive/congruence closure of this timeline (§4.3).
    ///
    /// Equality edges are grouped into classes with a `petgraph::UnGraph`;
    /// each class collapses to a representative member before the strict
    /// order graph is built, so `a = b ∧ b < c` closes to `a < c` for free.
    /// Strict-order edges (plus an injected `start e < end e` per interval
    /// entity mentioned anywhere in the input) form a `petgraph::DiGraph`
    /// whose full reachability closure is taken per node — equivalent to
    /// enumerating ancestor/descendant pairs within each weakly-connected
    /// component, since a directed edge can never cross components.
    pub fn closure(&self) -> Timeline {
        let mut lt_edges: Vec<(String, String)> = Vec::new();
        let mut eq_edges: Vec<(String, String)> = Vec::new();
        let mut unknowns: HashSet<PointRelation> = HashSet::new();
        let mut interval_entities: HashSet<String> = HashSet::new();
        let mut all_names: HashSet<String> = HashSet::new();

        for r in &self.relations {
            all_names.insert(r.source().to_string());
            all_names.insert(r.target().to_string());
            for endpoint in [r.source(), r.target()] {
                if let Some((kind, id)) = split_endpoint(endpoint) {
                    if kind == "start" || kind == "end" {
                        interval_entities.insert(id.to_string());
                    }
                }
            }
            match r.rel() {
                Rel::Lt => lt_edges.push((r.source().to_string(), r.target().to_string())),
                Rel::Gt => lt_edges.push((r.target().to_string(), r.source().to_string())),
                Rel::Eq => eq_edges.push((r.source().to_string(), r.target().to_string())),
                Rel::Unknown => {
                    unknowns.insert(r.clone());
                }
            }
        }
        for id in &interval_entities {
            let (start, end) = (format!("start {id}"), format!("end {id}"));
            all_names.insert(start.clone());
            all_names.insert(end.clone());
            lt_edges.push((start, end));
        }

        let (representative, eq_relations) = equality_classes(&eq_edges);
        let lt_closure = strict_order_closure(&lt_edges, &representative, &all_names);

        let mut out: HashSet<PointRelation> = HashSet::new();
        out.extend(eq_relations);
        out.extend(lt_closure);
        out.extend(unknowns);
        out.retain(|r| !r.is_self_relation());
        Timeline { relations: out }
    }

    /// Valid iff the explicit set is empty or its closure is non-empty,
    /// and neither set carries two relations for the same unordered pair.
    pub fn is_valid(&self) -> bool {
        if !self.relations.is_empty() && self.closure().is_empty() {
            return false;
        }
        no_pair_conflicts(&self.relations) && no_pair_conflicts(&self.closure().relations)
    }

    /// Reorient every relation so its source entity precedes its target
    /// entity in `entity_order`, inverting where it does not.
    pub fn sort(&self, entity_order: &HashMap<String, usize>) -> Timeline {
        let mut relations = HashSet::with_capacity(self.relations.len());
        for r in &self.relations {
            let src = entity_order.get(r.source_id()).copied().unwrap_or(usize::MAX);
            let tgt = entity_order.get(r.target_id()).copied().unwrap_or(usize::MAX);
            relations.insert(if src <= tgt { r.clone() } else { r.invert() });
        }
        Timeline { relations }
    }
}

impl FromIterator<PointRelation> for Timeline {
    fn from_iter<I: IntoIterator<Item = PointRelation>>(iter: I) -> Self {
        Timeline { relations: iter.into_iter().collect() }
    }
}

fn split_endpoint(name: &str) -> Option<(&str, &str)> {
    let mut parts = name.splitn(2, ' ');
    Some((parts.next()?, parts.next()?))
}

/// True iff no two relations in `relations` share an unordered endpoint
/// pair. Relations are already canonical, so the pair key is just
/// `(source, target)` with no re-sorting needed.
fn no_pair_conflicts(relations: &HashSet<PointRelation>) -> bool {
    let mut seen = HashSet::with_capacity(relations.len());
    relations.iter().all(|r| seen.insert(r.unordered_pair()))
}

/// Connected components of the `=` graph, collapsed to one representative
/// per class, plus every pairwise `=` relation within each class.
fn equality_classes(eq_edges: &[(String, String)]) -> (HashMap<String, String>, HashSet<PointRelation>) {
    let mut graph = UnGraph::<String, ()>::new_undirected();
    let mut index: HashMap<String, NodeIndex> = HashMap::new();
    for (a, b) in eq_edges {
        let ia = *index.entry(a.clone()).or_insert_with(|| graph.add_node(a.clone()));
        let ib = *index.entry(b.clone()).or_insert_with(|| graph.add_node(b.clone()));
        graph.add_edge(ia, ib, ());
    }

    let mut representative: HashMap<String, String> = HashMap::new();
    let mut eq_relations: HashSet<PointRelation> = HashSet::new();
    let mut visited = vec![false; graph.node_count()];
    for start in graph.node_indices() {
        if visited[start.index()] {
            continue;
        }
        let mut members = Vec::new();
        let mut dfs = Dfs::new(&graph, start);
        while let Some(n) = dfs.next(&graph) {
            if !visited[n.index()] {
                visited[n.index()] = true;
                members.push(graph[n].clone());
            }
        }
        members.sort();
        let rep = members.first().cloned().unwrap_or_default();
        for name in &members {
            representative.insert(name.clone(), rep.clone());
        }
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let r = PointRelation::new(members[i].clone(), members[j].clone(), Rel::Eq)
                    .expect("equality class members are already-validated endpoint names");
                eq_relations.insert(r);
            }
        }
    }
    (representative, eq_relations)
}

/// Full directed reachability closure of the `<` graph, built over
/// equality-class representatives, then expanded back out to every
/// member of each class.
fn strict_order_closure(
    lt_edges: &[(String, String)],
    representative: &HashMap<String, String>,
    all_names: &HashSet<String>,
) -> HashSet<PointRelation> {
    let rep_of = |name: &str| representative.get(name).cloned().unwrap_or_else(|| name.to_string());

    let mut graph = DiGraph::<String, ()>::new();
    let mut index: HashMap<String, NodeIndex> = HashMap::new();
    for (a, b) in lt_edges {
        let (ra, rb) = (rep_of(a), rep_of(b));
        let ia = *index.entry(ra.clone()).or_insert_with(|| graph.add_node(ra.clone()));
        let ib = *index.entry(rb.clone()).or_insert_with(|| graph.add_node(rb.clone()));
        graph.add_edge(ia, ib, ());
    }

    let mut members_of: HashMap<String, Vec<String>> = HashMap::new();
    for name in all_names {
        members_of.entry(rep_of(name)).or_default().push(name.clone());
    }

    let mut out = HashSet::new();
    for start in graph.node_indices() {
        let mut dfs = Dfs::new(&graph, start);
        dfs.next(&graph); // discard the start node itself
        while let Some(n) = dfs.next(&graph) {
            let (rep_u, rep_v) = (&graph[start], &graph[n]);
            if rep_u == rep_v {
                continue;
            }
            let empty = Vec::new();
            for au in members_of.get(rep_u).unwrap_or(&empty) {
                for av in members_of.get(rep_v).unwrap_or(&empty) {
                    if au == av {
                        continue;
                    }
                    let r = PointRelation::new(au.clone(), av.clone(), Rel::Lt)
                        .expect("closure endpoint names are already-validated");
                    out.insert(r);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: &str, b: &str, rel: Rel) -> PointRelation {
        PointRelation::new(a, b, rel).unwrap()
    }

    #[test]
    fn transitive_inference_across_intervals() {
        let mut t = Timeline::new();
        t.add(rel("start e0", "start e1", Rel::Lt));
        t.add(rel("start e1", "start e2", Rel::Lt));
        let closure = t.closure();
        assert!(closure.contains(&rel("start e0", "start e2", Rel::Lt)));
    }

    #[test]
    fn equality_propagates_through_strict_order() {
        let mut t = Timeline::new();
        t.add(rel("start e0", "start e1", Rel::Eq));
        t.add(rel("start e1", "start e2", Rel::Lt));
        let closure = t.closure();
        assert!(closure.contains(&rel("start e0", "start e2", Rel::Lt)));
    }

    #[test]
    fn contradiction_breaks_validity() {
        let mut t = Timeline::new();
        t.add(rel("start e0", "start e1", Rel::Lt));
        t.add(rel("start e1", "start e2", Rel::Lt));
        t.add(rel("start e0", "start e2", Rel::Gt));
        assert!(!t.is_valid());
    }

    #[test]
    fn unknown_relation_is_inert() {
        let mut t = Timeline::new();
        t.add(rel("start e0", "start e1", Rel::Unknown));
        let closure = t.closure();
        assert_eq!(closure.len(), 1);
        assert!(t.is_valid());
    }

    #[test]
    fn self_relations_never_survive_closure() {
        let mut t = Timeline::new();
        t.add(rel("start e0", "end e0", Rel::Lt));
        let closure = t.closure();
        assert!(closure.relations().iter().all(|r| !r.is_self_relation()));
    }

    #[test]
    fn closure_is_idempotent() {
        let mut t = Timeline::new();
        t.add(rel("start e0", "start e1", Rel::Lt));
        t.add(rel("start e1", "start e2", Rel::Lt));
        let once = t.closure();
        let twice = once.closure();
        assert_eq!(once, twice);
    }

    #[test]
    fn sort_orients_by_entity_order() {
        let mut order = HashMap::new();
        order.insert("e0".to_string(), 0);
        order.insert("e1".to_string(), 1);
        let mut t = Timeline::new();
        t.add(rel("start e1", "start e0", Rel::Gt));
        let sorted = t.sort(&order);
        let only = sorted.relations().iter().next().unwrap();
        assert_eq!(only.source_id(), "e0");
        assert_eq!(only.target_id(), "e1");
    }

    #[test]
    fn sort_reorients_even_when_entity_order_disagrees_with_lexicographic_order() {
        // "end e2" < "start e1" lexically, so PointRelation::new already
        // canonicalizes this to source="end e2", target="start e1" — the
        // opposite of entity order (e1 before e2). sort() must still
        // present it with e1's endpoint first.
        let mut order = HashMap::new();
        order.insert("e1".to_string(), 0);
        order.insert("e2".to_string(), 1);
        let mut t = Timeline::new();
        let r = rel("start e1", "end e2", Rel::Lt);
        assert_eq!(r.source(), "end e2"); // confirms the lex-order crossover
        t.add(r);
        let sorted = t.sort(&order);
        let only = sorted.relations().iter().next().unwrap();
        assert_eq!(only.source_id(), "e1");
        assert_eq!(only.target_id(), "e2");
        assert_eq!(only.source(), "start e1");
        assert_eq!(only.target(), "end e2");
        assert_eq!(only.rel(), Rel::Lt);
    }
}
