//! Progress events emitted during a synchronization run.

use serde::{Deserialize, Serialize};

/// A stage of a synchronization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    TopicList,
    TopicContent,
    Images,
}

impl SyncPhase {
    /// Message shown next to progress output for this phase.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopicList => "Downloading topic list",
            Self::TopicContent => "Downloading topic content",
            Self::Images => "Downloading images",
        }
    }
}

/// Progress event. `total` may be revised upward while a phase runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEvent {
    PhaseStarted { phase: SyncPhase, total: u64 },
    Progress { phase: SyncPhase, finished: u64, total: u64 },
    PhaseFinished { phase: SyncPhase },
}

impl SyncEvent {
    pub const fn phase(&self) -> SyncPhase {
        match self {
            Self::PhaseStarted { phase, .. }
            | Self::Progress { phase, .. }
            | Self::PhaseFinished { phase } => *phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = SyncEvent::Progress {
            phase: SyncPhase::TopicContent,
            finished: 3,
            total: 10,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "progress");
        assert_eq!(json["phase"], "topic_content");
        assert_eq!(event.phase(), SyncPhase::TopicContent);
    }
}
