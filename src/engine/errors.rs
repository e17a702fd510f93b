use thiserror::Error;

/// Errors that can arise inside the game engine or its save layer.
///
/// None of these ever reach the player directly: the command interpreter
/// converts every failure into an in-fiction log line and leaves state
/// untouched, so engine operations are total from the caller's perspective.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when looking up a room, item, or NPC that is not defined.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Returned when restoring a snapshot with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// A dynamic exits or description function reported a failure. Callers
    /// log this and fall back to an empty mapping; it never propagates.
    #[error("exit evaluation failed for room {room}: {detail}")]
    ExitEval { room: String, detail: String },

    /// Internal error (malformed world data, unexpected conditions).
    #[error("internal error: {0}")]
    Internal(String),
}
