use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// One of the four point-algebra relation symbols.
///
/// `Lt`/`Gt`/`Eq` participate in transitive inference; `Unknown` is an
/// annotation value only — it is carried through closure unchanged and
/// never combines with anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rel {
    Lt,
    Gt,
    Eq,
    Unknown,
}

impl Rel {
    pub fn parse(c: char) -> Result<Self, GameError> {
        match c {
            '<' => Ok(Rel::Lt),
            '>' => Ok(Rel::Gt),
            '=' => Ok(Rel::Eq),
            '-' => Ok(Rel::Unknown),
            other => Err(GameError::UnknownRelationSymbol(other)),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Rel::Lt => '<',
            Rel::Gt => '>',
            Rel::Eq => '=',
            Rel::Unknown => '-',
        }
    }

    /// The involution `< ↔ >`, identity on `=`/`-`.
    pub fn inverse(&self) -> Self {
        match self {
            Rel::Lt => Rel::Gt,
            Rel::Gt => Rel::Lt,
            Rel::Eq => Rel::Eq,
            Rel::Unknown => Rel::Unknown,
        }
    }

    /// Board cell encoding: `> = 0, < = 1, = = 2, - = 3`.
    pub fn encode(&self) -> i32 {
        match self {
            Rel::Gt => 0,
            Rel::Lt => 1,
            Rel::Eq => 2,
            Rel::Unknown => 3,
        }
    }
}

impl std::fmt::Display for Rel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A typed ordering assertion between two endpoints, identified by their
/// canonical names (`"<kind> <entity_id>"`).
///
/// `new()` stores its argument in *canonical form* — the endpoint-name
/// pair lexicographically ordered, inverting `rel` if the caller's order
/// was swapped — which is the representation every external caller and
/// the wire DTOs see. But identity (`PartialEq`/`Hash`) is defined below
/// on that same canonical form computed *on demand*, independent of
/// whatever order this value's fields physically hold. That split
/// matters for [`PointRelation::invert`]: it does a literal field swap
/// rather than re-running `new()`'s canonicalization, so that a relation
/// can be physically reoriented for presentation (as
/// [`crate::timeline::Timeline::sort`] does) without ever becoming a
/// distinct value under equality or hashing — `r.invert() == r` always,
/// satisfying the spec's "a relation equals its inverse" law regardless
/// of physical storage order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointRelation {
    source: String,
    target: String,
    rel: Rel,
}

/// The canonical `(source, target, rel)` this relation compares and
/// hashes as, independent of its physical field order.
fn canonical_form(r: &PointRelation) -> (&str, &str, Rel) {
    if r.source <= r.target {
        (&r.source, &r.target, r.rel)
    } else {
        (&r.target, &r.source, r.rel.inverse())
    }
}

impl PartialEq for PointRelation {
    fn eq(&self, other: &Self) -> bool {
        canonical_form(self) == canonical_form(other)
    }
}

impl Eq for PointRelation {}

impl Hash for PointRelation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_form(self).hash(state);
    }
}

impl PointRelation {
    /// Build the canonical form, validating that both endpoint names
    /// begin with a recognized kind word.
    pub fn new(source: impl Into<String>, target: impl Into<String>, rel: Rel) -> Result<Self, GameError> {
        let source = source.into();
        let target = target.into();
        validate_endpoint_name(&source)?;
        validate_endpoint_name(&target)?;
        Ok(match source.cmp(&target) {
            Ordering::Greater => Self { source: target, target: source, rel: rel.inverse() },
            _ => Self { source, target, rel },
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn rel(&self) -> Rel {
        self.rel
    }

    /// `(target, source, inverse(rel))` as a literal field swap — deliberately
    /// *not* routed through `new()`, which would silently re-canonicalize
    /// the swap away for any relation already in canonical form. Equality
    /// and hashing are defined on canonical form regardless of physical
    /// field order (see the module-level `canonical_form` helper above),
    /// so this is still the same relation under `==`; only its physical
    /// source/target labeling changes.
    pub fn invert(&self) -> Self {
        Self { source: self.target.clone(), target: self.source.clone(), rel: self.rel.inverse() }
    }

    /// The unordered endpoint-name pair this relation is asserted over,
    /// normalized to lexicographic order regardless of this value's
    /// physical field order — used as the contradiction-detection key
    /// (§3, §4.3 `is_valid`), which must treat a relation and any
    /// presentation-reoriented copy of it as the same pair.
    pub fn unordered_pair(&self) -> (&str, &str) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }

    pub fn source_endpoint(&self) -> &str {
        self.source.split_whitespace().next().unwrap_or_default()
    }

    pub fn source_id(&self) -> &str {
        self.source.split_whitespace().nth(1).unwrap_or_default()
    }

    pub fn target_endpoint(&self) -> &str {
        self.target.split_whitespace().next().unwrap_or_default()
    }

    pub fn target_id(&self) -> &str {
        self.target.split_whitespace().nth(1).unwrap_or_default()
    }

    /// True if source and target name the same entity (a self-relation,
    /// dropped from closure output per §4.3 step 7).
    pub fn is_self_relation(&self) -> bool {
        self.source_id() == self.target_id()
    }
}

fn validate_endpoint_name(name: &str) -> Result<(), GameError> {
    let ok = name.starts_with("start ") || name.starts_with("end ") || name.starts_with("instant ");
    match ok {
        true => Ok(()),
        false => Err(GameError::MalformedEndpoint(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_swapped_pair() {
        let a = PointRelation::new("start e1", "end e0", Rel::Lt).unwrap();
        let b = PointRelation::new("end e0", "start e1", Rel::Gt).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn inversion_is_an_involution() {
        let r = PointRelation::new("start e0", "end e1", Rel::Lt).unwrap();
        assert_eq!(r.invert().invert(), r);
    }

    #[test]
    fn invert_physically_swaps_fields_even_when_already_canonical() {
        // "start e0" < "end e1" lexically, so this is already in
        // canonical form; invert() must still swap the stored fields
        // rather than silently re-canonicalizing back to the input.
        let r = PointRelation::new("start e0", "end e1", Rel::Lt).unwrap();
        let inverted = r.invert();
        assert_eq!(inverted.source(), "end e1");
        assert_eq!(inverted.target(), "start e0");
        assert_eq!(inverted.rel(), Rel::Gt);
    }

    #[test]
    fn invert_is_equal_to_original_despite_swapped_fields() {
        let r = PointRelation::new("start e0", "end e1", Rel::Lt).unwrap();
        let inverted = r.invert();
        assert_eq!(inverted, r);
        let mut set = std::collections::HashSet::new();
        set.insert(r.clone());
        assert!(set.contains(&inverted));
    }

    #[test]
    fn unordered_pair_is_normalized_regardless_of_physical_order() {
        let r = PointRelation::new("start e0", "end e1", Rel::Lt).unwrap();
        let inverted = r.invert();
        assert_eq!(r.unordered_pair(), inverted.unordered_pair());
    }

    #[test]
    fn rejects_malformed_endpoint() {
        let err = PointRelation::new("foo e0", "end e1", Rel::Lt).unwrap_err();
        assert!(matches!(err, GameError::MalformedEndpoint(_)));
    }

    #[test]
    fn rejects_unknown_symbol() {
        assert!(matches!(Rel::parse('?'), Err(GameError::UnknownRelationSymbol('?'))));
    }

    #[test]
    fn accessors_split_on_whitespace() {
        let r = PointRelation::new("start e0", "start e1", Rel::Lt).unwrap();
        assert_eq!(r.source_endpoint(), "start");
        assert_eq!(r.source_id(), "e0");
        assert_eq!(r.target_endpoint(), "start");
        assert_eq!(r.target_id(), "e1");
    }

    #[test]
    fn self_relation_detected() {
        let r = PointRelation::new("start e0", "end e0", Rel::Lt).unwrap();
        assert!(r.is_self_relation());
    }
}
