use crate::document::Document;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Difficulty level: roughly the number of entities in the sampled
/// document. Controls which corpus the harness samples from; it has no
/// effect on core semantics (§6 Configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Two,
    Three,
    Four,
    Five,
}

impl Level {
    pub fn n_entities(&self) -> u8 {
        match self {
            Level::Two => 2,
            Level::Three => 3,
            Level::Four => 4,
            Level::Five => 5,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.n_entities())
    }
}

impl TryFrom<u8> for Level {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            4 => Ok(Level::Four),
            5 => Ok(Level::Five),
            other => Err(GameError::InvalidLevel(other)),
        }
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s.parse().map_err(|_| GameError::InvalidLevel(0))?;
        Level::try_from(n)
    }
}

/// The one external collaborator the core actually consumes (§1, §6a):
/// dataset loading is out of scope, but the interface the core calls
/// into is part of the core's contract with its caller.
pub trait CorpusSource {
    fn load(&self, level: Level) -> Result<Document, GameError>;
}

/// An in-memory corpus, useful for tests and for the `cli` binary, which
/// has no on-disk dataset to sample from.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus {
    documents: Vec<(Level, Document)>,
}

impl StaticCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, level: Level, document: Document) -> Self {
        self.documents.push((level, document));
        self
    }
}

impl CorpusSource for StaticCorpus {
    fn load(&self, level: Level) -> Result<Document, GameError> {
        self.documents
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, doc)| doc.clone())
            .ok_or_else(|| GameError::CorpusLoad { level, source: anyhow::anyhow!("no document registered for level {level}") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_levels_parse() {
        for n in 2..=5u8 {
            assert!(Level::try_from(n).is_ok());
        }
    }

    #[test]
    fn invalid_levels_rejected() {
        assert!(matches!(Level::try_from(1), Err(GameError::InvalidLevel(1))));
        assert!(matches!(Level::try_from(6), Err(GameError::InvalidLevel(6))));
    }

    #[test]
    fn from_str_roundtrips() {
        assert_eq!("3".parse::<Level>().unwrap(), Level::Three);
        assert!("9".parse::<Level>().is_err());
    }

    #[test]
    fn static_corpus_reports_missing_level() {
        let corpus = StaticCorpus::new();
        assert!(matches!(corpus.load(Level::Two), Err(GameError::CorpusLoad { .. })));
    }
}
