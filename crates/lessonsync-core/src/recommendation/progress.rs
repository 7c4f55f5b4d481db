use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterPlayState {
    NotStarted,
    StartedNotCompleted,
    InProgressSaved,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterProgress {
    pub exploration_id: String,
    pub play_state: ChapterPlayState,
}

/// A learner's progress through one story; chapters are in story order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryProgress {
    pub story_id: String,
    pub chapters: Vec<ChapterProgress>,
}

impl StoryProgress {
    /// A story counts as finished once its last chapter is completed.
    pub fn is_completed(&self) -> bool {
        self.chapters
            .last()
            .is_some_and(|chapter| chapter.play_state == ChapterPlayState::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicProgress {
    pub topic_id: String,
    pub stories: Vec<StoryProgress>,
}

impl TopicProgress {
    /// Whether any of the topic's stories is finished.
    pub fn is_fully_completed(&self) -> bool {
        self.stories.iter().any(StoryProgress::is_completed)
    }
}
