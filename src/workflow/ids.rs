//! Workflow identifier generation
//!
//! The engine is handed an identifier allocator instead of reaching for
//! wall-clock time, so uniqueness never depends on call timing and tests can
//! substitute predictable generators.

use uuid::Uuid;

/// Allocator for workflow and agent identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce the next unique identifier
    fn next_id(&self) -> String;
}

/// Generator backed by random UUID v4
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
