use chronoboard::corpus::{CorpusSource, Level, StaticCorpus};
use chronoboard::document::Document;
use chronoboard::dto::{DocumentDto, EntityDto, RelationDto};
use chronoboard::engine::Game;
use chronoboard::entity::{Entity, EntityKind};
use chronoboard::error::GameError;
use chronoboard::relation::{PointRelation, Rel};

fn doc_from_json() -> Document {
    let dto = DocumentDto {
        text: "first second third".to_string(),
        entities: vec![
            EntityDto { id: "a".into(), text: "first".into(), offsets: (0, 5), kind: EntityKind::Interval },
            EntityDto { id: "b".into(), text: "second".into(), offsets: (6, 12), kind: EntityKind::Interval },
            EntityDto { id: "c".into(), text: "third".into(), offsets: (13, 18), kind: EntityKind::Interval },
        ],
        relations: vec![RelationDto { source: "start a".into(), target: "start b".into(), relation: "<".into() }],
    };
    dto.try_into().unwrap()
}

#[test]
fn loads_from_wire_dto_and_plays_through() {
    let doc = doc_from_json();
    let mut game = Game::new(doc);
    let result = game.step(0, 2, Rel::Lt).unwrap();
    assert!(!result.terminated);
    assert_eq!(result.info.n_annotated, 1);
}

#[test]
fn scenario_invalid_level_rejected() {
    assert!(matches!(Level::try_from(1), Err(GameError::InvalidLevel(1))));
    assert!(matches!(Level::try_from(6), Err(GameError::InvalidLevel(6))));
}

#[test]
fn scenario_missing_corpus_level_is_a_caller_error_not_a_panic() {
    let corpus = StaticCorpus::new();
    assert!(matches!(corpus.load(Level::Four), Err(GameError::CorpusLoad { level: Level::Four, .. })));
}

#[test]
fn scenario_malformed_action_rejected_and_mutates_nothing() {
    let mut game = Game::new(doc_from_json());
    let before = game.board().to_rows();
    let err = game.step(0, 1, Rel::Lt).unwrap_err(); // (0,1) is start a / end a: same entity
    assert!(matches!(err, GameError::UnknownPairIndex(0, 1)));
    assert_eq!(game.board().to_rows(), before);
}

#[test]
fn scenario_undo_round_trip_restores_initial_state() {
    let mut game = Game::new(doc_from_json());
    let (initial, _) = game.reset();
    game.step(0, 2, Rel::Lt).unwrap();
    game.step(2, 4, Rel::Lt).unwrap();
    game.undo();
    game.undo();
    let (obs, _, restored) = game.undo();
    assert!(!restored);
    assert_eq!(obs.board, initial.board);
    assert_eq!(game.board().to_rows(), initial.board);
}

#[test]
fn every_explicit_relation_appears_encoded_on_the_board() {
    let mut game = Game::new(doc_from_json());
    game.step(0, 2, Rel::Lt).unwrap();
    let cell = game.board().get(0, 2);
    assert_eq!(cell, Rel::Lt.encode());
}

#[test]
fn diagonal_and_same_entity_cells_stay_masked_across_moves() {
    use chronoboard::MASKED;
    let mut game = Game::new(doc_from_json());
    game.step(0, 2, Rel::Lt).unwrap();
    game.step(2, 4, Rel::Lt).unwrap();
    let n = game.n_endpoints();
    for i in 0..n {
        assert_eq!(game.board().get(i, i), MASKED);
    }
    assert_eq!(game.board().get(0, 1), MASKED); // start a / end a: same entity
}

#[test]
fn point_relation_equality_is_invariant_under_construction_order() {
    let a = PointRelation::new("start e1", "end e0", Rel::Lt).unwrap();
    let b = PointRelation::new("end e0", "start e1", Rel::Gt).unwrap();
    assert_eq!(a, b);
    let mut set = std::collections::HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

#[test]
fn two_entity_success_matches_ground_truth_board() {
    let entities = vec![
        Entity::new("a", "first", (0, 5), EntityKind::Interval),
        Entity::new("b", "second", (6, 12), EntityKind::Interval),
    ];
    let truth = vec![PointRelation::new("start e0", "start e1", Rel::Lt).unwrap()];
    let mut game = Game::new(Document::new("first second", entities, truth));

    for &(i, j, sym) in &[(0usize, 2usize, '<'), (0, 3, '<'), (1, 2, '>'), (1, 3, '<')] {
        let rel = Rel::parse(sym).unwrap();
        let result = game.step(i, j, rel).unwrap();
        if i == 1 && j == 3 {
            assert!(result.terminated);
            assert!(result.info.is_success);
            assert_eq!(result.info.true_board.unwrap().to_rows(), result.observation.board);
        } else {
            assert!(!result.terminated);
        }
    }
}
