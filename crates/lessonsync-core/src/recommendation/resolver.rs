use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::progress::TopicProgress;
use super::table::TopicDependencyTable;

/// A topic suggested to the learner as a next step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromotedTopicId {
    pub topic_id: String,
}

/// Computes next-topic recommendations against a dependency table.
#[derive(Debug, Clone, Default)]
pub struct TopicDependencyResolver {
    table: TopicDependencyTable,
}

impl TopicDependencyResolver {
    pub const fn new(table: TopicDependencyTable) -> Self {
        Self { table }
    }

    pub const fn table(&self) -> &TopicDependencyTable {
        &self.table
    }

    /// Topics for which nothing further needs recommending: every fully
    /// completed topic plus all of their transitive prerequisites.
    pub fn implied_finished_topic_ids(&self, topic_progress: &[TopicProgress]) -> IndexSet<String> {
        let completed: IndexSet<String> = topic_progress
            .iter()
            .filter(|progress| progress.is_fully_completed())
            .map(|progress| progress.topic_id.clone())
            .collect();
        let prerequisites = self
            .table
            .transitive_dependencies(completed.iter().map(String::as_str));
        completed.into_iter().chain(prerequisites).collect()
    }

    /// Recommends each available topic that is not implied-finished and whose
    /// direct prerequisites all are. Output follows `available_topic_ids` order.
    pub fn recommend_next_topics(
        &self,
        topic_progress: &[TopicProgress],
        available_topic_ids: &[String],
    ) -> Vec<PromotedTopicId> {
        let finished = self.implied_finished_topic_ids(topic_progress);
        let recommended: Vec<PromotedTopicId> = available_topic_ids
            .iter()
            .filter(|topic_id| !finished.contains(topic_id.as_str()))
            .filter(|topic_id| {
                self.table
                    .dependencies(topic_id)
                    .all(|prerequisite| finished.contains(prerequisite))
            })
            .map(|topic_id| PromotedTopicId {
                topic_id: topic_id.clone(),
            })
            .collect();
        debug!(
            finished = finished.len(),
            recommended = recommended.len(),
            "Computed topic recommendations"
        );
        recommended
    }
}
