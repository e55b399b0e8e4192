use crate::board::{make_board, make_board_from, Board, PairIndex};
use crate::document::{remap_entity_ids, Document};
use crate::endpoint::{Endpoint, Kind};
use crate::entity::{sort_by_offset, EntityKind};
use crate::error::GameError;
use crate::relation::{PointRelation, Rel};
use crate::timeline::Timeline;
use std::collections::{HashMap, HashSet};

/// `+1` per newly derived relation matching the ground truth.
pub const R_CORRECT: i64 = 1;
/// Terminal penalty for deriving an inconsistency.
pub const R_INVALID: i64 = -1;
/// Bonus added to the final step's reward on success.
pub const R_SUCCESS: i64 = 0;

/// A read-only snapshot of board state returned after every move (§6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub context: String,
    pub board: Vec<Vec<i32>>,
    pub endpoints: Vec<String>,
    pub entities: Vec<String>,
}

/// Bookkeeping returned alongside every observation (§4.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub n_inferred: usize,
    pub n_annotated: usize,
    pub n_annotated_correct: usize,
    pub is_success: bool,
    pub terminal_observation: Option<Observation>,
    pub true_board: Option<Board>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: i64,
    pub terminated: bool,
    pub info: Info,
}

/// `(step_id, n_inferred, n_annotated, n_annotated_correct, undo stacks)`
/// (§3). The two histories are popped together, LIFO, by `undo`.
#[derive(Debug, Clone, Default)]
struct GameTracker {
    step_id: usize,
    n_inferred: usize,
    n_annotated: usize,
    n_annotated_correct: usize,
    timeline_history: Vec<Timeline>,
    board_history: Vec<Board>,
}

/// One playthrough of the temporal annotation game over a single
/// document. Owns every mutable piece of state reachable from it;
/// callers only ever see [`Observation`]/[`Info`] snapshots (§3
/// Lifecycle).
#[derive(Debug, Clone)]
pub struct Game {
    true_doc: Document,
    pred_doc: Document,
    endpoints: Vec<Endpoint>,
    pairs: PairIndex,
    entity_order: HashMap<String, usize>,
    true_timeline: Timeline,
    entity_pairs: HashSet<(String, String)>,
    pred_timeline: Timeline,
    board: Board,
    tracker: GameTracker,
    cumulative_reward: i64,
}

impl Game {
    /// Build a game from a ground-truth document. Entity IDs are
    /// remapped to `e0, e1, …` in offset order before anything else is
    /// derived, so endpoint names, the ground-truth timeline, and every
    /// later action share one ID space (§4.5).
    pub fn new(doc: Document) -> Self {
        let mut entities = doc.entities;
        sort_by_offset(&mut entities);
        let mut relations = doc.relations;
        remap_entity_ids(&mut entities, &mut relations);
        let true_doc = Document::new(doc.text, entities, relations);

        let endpoints = build_endpoints(&true_doc);
        let pairs = PairIndex::build(&endpoints);
        let entity_order = true_doc.entity_order();
        let true_timeline: Timeline = true_doc.relations.iter().cloned().collect();
        let entity_pairs = true_timeline
            .relations()
            .iter()
            .map(|r| (r.source().to_string(), r.target().to_string()))
            .collect();

        let pred_doc = Document::new(true_doc.text.clone(), true_doc.entities.clone(), Vec::new());
        let board = make_board(endpoints.len(), &pairs, None);

        log::debug!(
            "new game: {} entities, {} endpoints, {} orderable pairs",
            true_doc.entities.len(),
            endpoints.len(),
            pairs.n_relations(),
        );

        Self {
            true_doc,
            pred_doc,
            endpoints,
            pairs,
            entity_order,
            true_timeline,
            entity_pairs,
            pred_timeline: Timeline::new(),
            board,
            tracker: GameTracker::default(),
            cumulative_reward: 0,
        }
    }

    pub fn n_endpoints(&self) -> usize {
        self.endpoints.len()
    }

    pub fn n_relations(&self) -> usize {
        self.pairs.n_relations()
    }

    pub fn pairs(&self) -> &PairIndex {
        &self.pairs
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn cumulative_reward(&self) -> i64 {
        self.cumulative_reward
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Clear predicted state back to a fresh, fully-unclassified board.
    pub fn reset(&mut self) -> (Observation, Info) {
        self.pred_doc.relations.clear();
        self.pred_timeline = Timeline::new();
        self.board = make_board(self.endpoints.len(), &self.pairs, None);
        self.tracker = GameTracker::default();
        self.cumulative_reward = 0;
        (self.observation(), Info {
            n_inferred: 0,
            n_annotated: 0,
            n_annotated_correct: 0,
            is_success: false,
            terminal_observation: None,
            true_board: None,
        })
    }

    /// Assert `rel` over the endpoint pair at `(i, j)`, close the
    /// predicted timeline, re-encode the board, and score the move
    /// against the ground truth (§4.5).
    pub fn step(&mut self, i: usize, j: usize, rel: Rel) -> Result<StepResult, GameError> {
        if !self.pairs.contains(i, j) {
            return Err(GameError::UnknownPairIndex(i, j));
        }
        let (source, target) = self.pairs.names_for(i, j).expect("checked above").clone();
        let asserted = PointRelation::new(source, target, rel)?;

        self.tracker.timeline_history.push(self.pred_timeline.clone());
        self.tracker.board_history.push(self.board.clone());
        self.tracker.step_id += 1;

        let mut explicit = self.pred_timeline.clone();
        explicit.add(asserted.clone());
        let closure = explicit.closure();

        let inferred: Vec<PointRelation> =
            closure.relations().difference(explicit.relations()).cloned().collect();
        self.tracker.n_inferred += inferred.len();

        let mut new_relations = Timeline::new();
        new_relations.add(asserted);
        for r in inferred {
            new_relations.add(r);
        }
        self.tracker.n_annotated += new_relations.len();

        self.pred_timeline = closure.sort(&self.entity_order);
        self.pred_doc.relations = self.pred_timeline.relations().iter().cloned().collect();
        self.board = make_board_from(self.endpoints.len(), &self.pairs, self.pred_timeline.relations().iter());

        let valid = self.pred_timeline.is_valid();
        let (terminated, is_success) = if !valid {
            log::warn!("step {}: contradiction derived, game over", self.tracker.step_id);
            (true, false)
        } else if self.board.is_complete() {
            let success = self.true_timeline.relations().is_subset(self.pred_timeline.relations());
            log::debug!("step {}: board complete, success = {success}", self.tracker.step_id);
            (true, success)
        } else {
            (false, false)
        };

        let reward = self.score(&new_relations, terminated, is_success);
        self.cumulative_reward += reward;
        log::trace!("step {}: reward {reward}, cumulative {}", self.tracker.step_id, self.cumulative_reward);

        let observation = self.observation();
        let terminal_observation = terminated.then(|| observation.clone());
        let true_board = terminated
            .then(|| make_board_from(self.endpoints.len(), &self.pairs, self.true_timeline.relations().iter()));

        Ok(StepResult {
            observation,
            reward,
            terminated,
            info: Info {
                n_inferred: self.tracker.n_inferred,
                n_annotated: self.tracker.n_annotated,
                n_annotated_correct: self.tracker.n_annotated_correct,
                is_success,
                terminal_observation,
                true_board,
            },
        })
    }

    fn score(&mut self, new_relations: &Timeline, terminated: bool, is_success: bool) -> i64 {
        if terminated && !is_success {
            return R_INVALID;
        }
        let mut correct = 0i64;
        let mut wrong = 0i64;
        for r in new_relations.relations() {
            if self.true_timeline.contains(r) {
                correct += 1;
            } else if self.entity_pairs.contains(&(r.source().to_string(), r.target().to_string())) {
                wrong += 1;
            }
        }
        self.tracker.n_annotated_correct += correct as usize;
        correct * R_CORRECT - wrong + if is_success { R_SUCCESS } else { 0 }
    }

    /// Pop the undo stacks and restore the predicted timeline and board
    /// verbatim. Cumulative reward is deliberately *not* rolled back
    /// (§4.5): callers read it as score-to-date, not score-in-hand.
    pub fn undo(&mut self) -> (Observation, Info, bool) {
        let restored = match (self.tracker.timeline_history.pop(), self.tracker.board_history.pop()) {
            (Some(timeline), Some(board)) => {
                self.pred_timeline = timeline;
                self.board = board;
                self.pred_doc.relations = self.pred_timeline.relations().iter().cloned().collect();
                self.tracker.step_id = self.tracker.step_id.saturating_sub(1);
                log::debug!("undo: restored step {}", self.tracker.step_id);
                true
            }
            _ => {
                log::trace!("undo: history empty, nothing to restore");
                false
            }
        };
        (
            self.observation(),
            Info {
                n_inferred: self.tracker.n_inferred,
                n_annotated: self.tracker.n_annotated,
                n_annotated_correct: self.tracker.n_annotated_correct,
                is_success: false,
                terminal_observation: None,
                true_board: None,
            },
            restored,
        )
    }

    fn observation(&self) -> Observation {
        Observation {
            context: self.true_doc.tagged_context(),
            board: self.board.to_rows(),
            endpoints: self.endpoints.iter().map(Endpoint::label).collect(),
            entities: self.true_doc.entities.iter().map(|e| e.text.clone()).collect(),
        }
    }
}

/// Interleaved endpoint sequence: `[start_e0, end_e0, start_e1, end_e1,
/// …]`, with instant entities contributing their single endpoint at
/// their own offset-sorted position (Open Question (a), resolved in
/// DESIGN.md).
fn build_endpoints(doc: &Document) -> Vec<Endpoint> {
    let mut endpoints = Vec::with_capacity(doc.entities.len() * 2);
    for entity in &doc.entities {
        match entity.kind {
            EntityKind::Interval => {
                endpoints.push(Endpoint::new(Kind::Start, entity.id.clone(), entity.text.clone(), entity.offsets));
                endpoints.push(Endpoint::new(Kind::End, entity.id.clone(), entity.text.clone(), entity.offsets));
            }
            EntityKind::Instant => {
                endpoints.push(Endpoint::new(Kind::Instant, entity.id.clone(), entity.text.clone(), entity.offsets));
            }
        }
    }
    endpoints
}
