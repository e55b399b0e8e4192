use crate::corpus::Level;

/// Errors the core raises to callers.
///
/// Contradiction and termination are never represented here — they are
/// in-band state on [`crate::engine::StepResult`]. Only malformed input
/// reaches this type, so a caller translating to HTTP can match on the
/// variant instead of parsing a message.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("malformed endpoint name {0:?}: must start with \"start \", \"end \", or \"instant \"")]
    MalformedEndpoint(String),

    #[error("unknown relation symbol {0:?}: expected one of '<', '>', '=', '-'")]
    UnknownRelationSymbol(char),

    #[error("unknown pair index ({0}, {1}): not present in the orderable-pair index")]
    UnknownPairIndex(usize, usize),

    #[error("invalid difficulty level {0}: expected one of 2, 3, 4, 5")]
    InvalidLevel(u8),

    #[error("entity {0:?} referenced by a relation is not declared among the document's entities")]
    UnknownEntity(String),

    #[error("corpus source failed to load level {level}")]
    CorpusLoad {
        level: Level,
        #[source]
        source: anyhow::Error,
    },
}
