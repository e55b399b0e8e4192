//! Point-algebra temporal annotation game: timeline closure, consistency
//! checking, and episode scoring.
//!
//! The reasoning core lives in [`timeline`]/[`relation`]/[`endpoint`];
//! [`engine`] wraps it in the turn-based game loop (reset/step/undo,
//! reward, termination). Everything that would sit outside the core in
//! a deployed system — the HTTP façade, dataset loading, NLP tagging —
//! is out of scope here and touched only through [`corpus::CorpusSource`].

pub mod board;
pub mod corpus;
pub mod document;
pub mod dto;
pub mod endpoint;
pub mod engine;
pub mod entity;
pub mod error;
pub mod relation;
pub mod timeline;

#[cfg(feature = "cli")]
pub mod logging;

pub use board::{Board, MASKED, UNCLASSIFIED};
pub use corpus::{CorpusSource, Level, StaticCorpus};
pub use document::Document;
pub use endpoint::{Endpoint, Kind};
pub use engine::{Game, Info, Observation, StepResult};
pub use entity::{Entity, EntityKind};
pub use error::GameError;
pub use relation::{PointRelation, Rel};
pub use timeline::Timeline;
