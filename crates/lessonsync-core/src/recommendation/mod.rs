//! Next-topic recommendations driven by a topic dependency graph.

mod progress;
mod resolver;
mod table;

use thiserror::Error;

pub use progress::{ChapterPlayState, ChapterProgress, StoryProgress, TopicProgress};
pub use resolver::{PromotedTopicId, TopicDependencyResolver};
pub use table::{TopicDependencyTable, topic_ids};

/// Errors produced while building or walking a dependency table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    /// The table's prerequisite relation contains at least one cycle.
    #[error("Topic dependency cycle detected among: {}", topic_ids.join(", "))]
    CycleDetected {
        /// Every topic that is part of, or only reachable through, a cycle (sorted).
        topic_ids: Vec<String>,
    },
}

pub type DependencyResult<T> = Result<T, DependencyError>;
