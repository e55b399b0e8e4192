//! Wire-format mirrors of the JSON shapes in §6, kept deliberately
//! separate from the internal `Endpoint`/`PointRelation`/`Timeline`
//! representations (the way the teacher crate's own `dto` module
//! separates request/response shapes from `gameplay` domain types).

use crate::board::Board;
use crate::document::Document;
use crate::engine::{Info, Observation};
use crate::entity::{Entity, EntityKind};
use crate::error::GameError;
use crate::relation::{PointRelation, Rel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDto {
    pub id: String,
    pub text: String,
    pub offsets: (usize, usize),
    #[serde(rename = "type", default)]
    pub kind: EntityKind,
}

impl From<EntityDto> for Entity {
    fn from(dto: EntityDto) -> Self {
        Entity::new(dto.id, dto.text, dto.offsets, dto.kind)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationDto {
    pub source: String,
    pub target: String,
    pub relation: String,
}

impl TryFrom<RelationDto> for PointRelation {
    type Error = GameError;

    fn try_from(dto: RelationDto) -> Result<Self, Self::Error> {
        let symbol = dto
            .relation
            .chars()
            .next()
            .ok_or(GameError::UnknownRelationSymbol(' '))?;
        PointRelation::new(dto.source, dto.target, Rel::parse(symbol)?)
    }
}

impl From<&PointRelation> for RelationDto {
    fn from(r: &PointRelation) -> Self {
        Self { source: r.source().to_string(), target: r.target().to_string(), relation: r.rel().symbol().to_string() }
    }
}

/// The input document schema (§6): text, entities, and a ground-truth
/// relation set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDto {
    pub text: String,
    pub entities: Vec<EntityDto>,
    pub relations: Vec<RelationDto>,
}

impl TryFrom<DocumentDto> for Document {
    type Error = GameError;

    fn try_from(dto: DocumentDto) -> Result<Self, Self::Error> {
        let entities = dto.entities.into_iter().map(Entity::from).collect();
        let relations = dto.relations.into_iter().map(PointRelation::try_from).collect::<Result<Vec<_>, _>>()?;
        Ok(Document::new(dto.text, entities, relations))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationDto {
    pub context: String,
    pub board: Vec<Vec<i32>>,
    pub endpoints: Vec<String>,
    pub entities: Vec<String>,
}

impl From<Observation> for ObservationDto {
    fn from(obs: Observation) -> Self {
        Self { context: obs.context, board: obs.board, endpoints: obs.endpoints, entities: obs.entities }
    }
}

/// The action schema (§6): `((i, j), rel)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionDto {
    pub i: usize,
    pub j: usize,
    pub relation: char,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoDto {
    pub n_inferred: usize,
    pub n_annotated: usize,
    pub n_annotated_correct: usize,
    pub is_success: bool,
    pub terminal_observation: Option<ObservationDto>,
    pub true_board: Option<Vec<Vec<i32>>>,
}

impl From<Info> for InfoDto {
    fn from(info: Info) -> Self {
        Self {
            n_inferred: info.n_inferred,
            n_annotated: info.n_annotated,
            n_annotated_correct: info.n_annotated_correct,
            is_success: info.is_success,
            terminal_observation: info.terminal_observation.map(ObservationDto::from),
            true_board: info.true_board.as_ref().map(Board::to_rows),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResultDto {
    pub observation: ObservationDto,
    pub reward: i64,
    pub terminated: bool,
    pub info: InfoDto,
}

impl From<crate::engine::StepResult> for StepResultDto {
    fn from(result: crate::engine::StepResult) -> Self {
        Self {
            observation: result.observation.into(),
            reward: result.reward,
            terminated: result.terminated,
            info: result.info.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_dto_roundtrips_through_point_relation() {
        let dto = RelationDto { source: "start e0".into(), target: "start e1".into(), relation: "<".into() };
        let r: PointRelation = dto.try_into().unwrap();
        let back = RelationDto::from(&r);
        assert_eq!(back.source, "start e0");
        assert_eq!(back.target, "start e1");
        assert_eq!(back.relation, "<");
    }

    #[test]
    fn relation_dto_canonicalizes_source_and_target_by_lex_order() {
        // "end e1" sorts before "start e0" lexically, so the DTO's
        // source/target order flips on the way through PointRelation.
        let dto = RelationDto { source: "start e0".into(), target: "end e1".into(), relation: "<".into() };
        let r: PointRelation = dto.try_into().unwrap();
        let back = RelationDto::from(&r);
        assert_eq!(back.source, "end e1");
        assert_eq!(back.target, "start e0");
        assert_eq!(back.relation, ">");
    }

    #[test]
    fn relation_dto_rejects_unknown_symbol() {
        let dto = RelationDto { source: "start e0".into(), target: "end e1".into(), relation: "?".into() };
        let err: Result<PointRelation, _> = dto.try_into();
        assert!(matches!(err, Err(GameError::UnknownRelationSymbol('?'))));
    }

    #[test]
    fn entity_dto_defaults_to_interval() {
        let json = r#"{"id":"a","text":"today","offsets":[0,5]}"#;
        let dto: EntityDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.kind, EntityKind::Interval);
    }
}
