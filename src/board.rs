use crate::endpoint::Endpoint;
use crate::relation::PointRelation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Not part of any orderable pair: same entity, or below/on the diagonal.
pub const MASKED: i32 = -2;
/// An orderable pair with no relation asserted yet.
pub const UNCLASSIFIED: i32 = -1;

/// Bijection between orderable endpoint pairs `(i, j)` with `i < j` and
/// endpoint names, built once per game from the endpoint sequence.
#[derive(Debug, Clone)]
pub struct PairIndex {
    idx_to_pair: HashMap<(usize, usize), (String, String)>,
    name_to_index: HashMap<String, usize>,
}

impl PairIndex {
    pub fn build(endpoints: &[Endpoint]) -> Self {
        let mut idx_to_pair = HashMap::new();
        let mut name_to_index = HashMap::new();
        for (idx, e) in endpoints.iter().enumerate() {
            name_to_index.insert(e.canonical_name(), idx);
        }
        for i in 0..endpoints.len() {
            for j in (i + 1)..endpoints.len() {
                if endpoints[i].entity_id == endpoints[j].entity_id {
                    continue;
                }
                idx_to_pair.insert((i, j), (endpoints[i].canonical_name(), endpoints[j].canonical_name()));
            }
        }
        Self { idx_to_pair, name_to_index }
    }

    pub fn n_relations(&self) -> usize {
        self.idx_to_pair.len()
    }

    pub fn names_for(&self, i: usize, j: usize) -> Option<&(String, String)> {
        self.idx_to_pair.get(&(i, j))
    }

    /// Position of an endpoint in the fixed endpoint sequence, by its
    /// canonical name. Independent of which side of a relation it names.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// The orderable `(i, j)` cell (`i < j`, by endpoint position) two
    /// endpoint names land on. A [`PointRelation`]'s source/target order
    /// is lexicographic, not positional, so callers needing the encoded
    /// direction must compare against the returned `i` themselves (see
    /// [`make_board_from`]).
    pub fn index_for(&self, a: &str, b: &str) -> Option<(usize, usize)> {
        let pi = self.position_of(a)?;
        let pj = self.position_of(b)?;
        Some(if pi < pj { (pi, pj) } else { (pj, pi) })
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.idx_to_pair.contains_key(&(i, j))
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&(usize, usize), &(String, String))> {
        self.idx_to_pair.iter()
    }
}

/// An `n × n` grid of cell values: [`MASKED`], [`UNCLASSIFIED`], or a
/// relation's [`crate::relation::Rel::encode`] value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    n: usize,
    cells: Vec<i32>,
}

impl Board {
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * self.n + j]
    }

    fn set(&mut self, i: usize, j: usize, value: i32) {
        self.cells[i * self.n + j] = value;
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Render as a nested `Vec<Vec<i32>>`, the shape the observation DTO
    /// exposes externally (§4.4, §6).
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.cells.chunks(self.n).map(|row| row.to_vec()).collect()
    }

    pub fn count(&self, value: i32) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }

    /// All non-masked cells classified, i.e. no [`UNCLASSIFIED`] remains.
    pub fn is_complete(&self) -> bool {
        !self.cells.contains(&UNCLASSIFIED)
    }
}

/// Allocate an `n × n` board, mask everything, unmask the orderable
/// pairs, then stamp in any relations provided (§4.4).
pub fn make_board(n: usize, pairs: &PairIndex, relations: Option<&PointRelation>) -> Board {
    make_board_from(n, pairs, relations.into_iter())
}

pub fn make_board_from<'a>(n: usize, pairs: &PairIndex, relations: impl Iterator<Item = &'a PointRelation>) -> Board {
    let mut board = Board { n, cells: vec![MASKED; n * n] };
    for (&(i, j), _) in pairs.pairs() {
        board.set(i, j, UNCLASSIFIED);
    }
    for r in relations {
        let (Some(pi), Some(pj)) = (pairs.position_of(r.source()), pairs.position_of(r.target())) else {
            continue;
        };
        if pi < pj {
            board.set(pi, pj, r.rel().encode());
        } else {
            board.set(pj, pi, r.rel().inverse().encode());
        }
    }
    board
}
