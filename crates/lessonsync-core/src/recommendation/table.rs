use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use super::{DependencyError, DependencyResult};

/// Ids of the topics in the production catalog.
pub mod topic_ids {
    pub const PLACE_VALUES: &str = "iX9kYCjnouWN";
    pub const ADDITION_AND_SUBTRACTION: &str = "sWBXKH4PZcK6";
    pub const MULTIPLICATION: &str = "C4fqwrvqWpRm";
    pub const DIVISION: &str = "qW12maD4hiA8";
    pub const EXPRESSIONS_AND_EQUATIONS: &str = "dLmjjMDbCcrf";
    pub const FRACTIONS: &str = "0abdeaJhmfPm";
    pub const RATIOS: &str = "5g0nxGUmx5J5";
}

/// Maps each topic id to the set of topics that must be finished first.
///
/// Construction rejects cyclic tables, so every walk over a table terminates.
/// Topics are kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDependencyTable {
    dependencies: IndexMap<String, IndexSet<String>>,
}

impl TopicDependencyTable {
    /// Builds a table from `(topic, prerequisites)` entries, rejecting cycles.
    pub fn new<I, T, D, P>(entries: I) -> DependencyResult<Self>
    where
        I: IntoIterator<Item = (T, D)>,
        T: Into<String>,
        D: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut dependencies: IndexMap<String, IndexSet<String>> = IndexMap::new();
        for (topic_id, prerequisites) in entries {
            dependencies
                .entry(topic_id.into())
                .or_default()
                .extend(prerequisites.into_iter().map(Into::into));
        }
        let table = Self { dependencies };
        table.verify_acyclic()?;
        Ok(table)
    }

    /// The dependency graph of the production math classroom.
    pub fn default_table() -> Self {
        use topic_ids::{
            ADDITION_AND_SUBTRACTION, DIVISION, EXPRESSIONS_AND_EQUATIONS, FRACTIONS,
            MULTIPLICATION, PLACE_VALUES, RATIOS,
        };

        let arithmetic = [ADDITION_AND_SUBTRACTION, MULTIPLICATION, DIVISION];
        let entries: [(&str, &[&str]); 7] = [
            (PLACE_VALUES, &[]),
            (ADDITION_AND_SUBTRACTION, &[PLACE_VALUES]),
            (MULTIPLICATION, &[ADDITION_AND_SUBTRACTION]),
            (DIVISION, &[MULTIPLICATION]),
            (EXPRESSIONS_AND_EQUATIONS, &arithmetic),
            (FRACTIONS, &arithmetic),
            (RATIOS, &arithmetic),
        ];
        let dependencies = entries
            .into_iter()
            .map(|(topic_id, prerequisites)| {
                (
                    topic_id.to_string(),
                    prerequisites.iter().map(|id| (*id).to_string()).collect(),
                )
            })
            .collect();
        Self { dependencies }
    }

    /// Adds topics that have no prerequisites, such as test topics.
    #[must_use]
    pub fn with_test_topics<I, T>(mut self, topic_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for topic_id in topic_ids {
            self.dependencies.entry(topic_id.into()).or_default();
        }
        self
    }

    pub fn contains(&self, topic_id: &str) -> bool {
        self.dependencies.contains_key(topic_id)
    }

    /// Topic ids in table order.
    pub fn topic_ids(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Direct prerequisites of `topic_id`; unknown topics have none.
    pub fn dependencies(&self, topic_id: &str) -> impl Iterator<Item = &str> {
        self.dependencies
            .get(topic_id)
            .into_iter()
            .flat_map(|prerequisites| prerequisites.iter().map(String::as_str))
    }

    /// Every prerequisite reachable from `roots`, excluding the roots themselves
    /// unless one is a prerequisite of another.
    pub fn transitive_dependencies<'a, I>(&self, roots: I) -> IndexSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut visited: IndexSet<String> = IndexSet::new();
        let mut worklist: VecDeque<&str> = roots.into_iter().collect();
        while let Some(topic_id) = worklist.pop_front() {
            for prerequisite in self.dependencies(topic_id) {
                if visited.insert(prerequisite.to_string()) {
                    worklist.push_back(prerequisite);
                }
            }
        }
        visited
    }

    /// Kahn's algorithm over the prerequisite relation.
    fn verify_acyclic(&self) -> DependencyResult<()> {
        let mut remaining: IndexMap<&str, usize> = IndexMap::new();
        let mut dependents: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (topic_id, prerequisites) in &self.dependencies {
            *remaining.entry(topic_id.as_str()).or_default() += prerequisites.len();
            for prerequisite in prerequisites {
                remaining.entry(prerequisite.as_str()).or_default();
                dependents
                    .entry(prerequisite.as_str())
                    .or_default()
                    .push(topic_id.as_str());
            }
        }

        let mut ready: VecDeque<&str> = remaining
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(topic_id, _)| *topic_id)
            .collect();
        while let Some(topic_id) = ready.pop_front() {
            for dependent in dependents.get(topic_id).into_iter().flatten() {
                if let Some(count) = remaining.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(*dependent);
                    }
                }
            }
        }

        let mut blocked: Vec<String> = remaining
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(topic_id, _)| topic_id.to_string())
            .collect();
        if blocked.is_empty() {
            return Ok(());
        }
        blocked.sort();
        Err(DependencyError::CycleDetected { topic_ids: blocked })
    }
}

impl Default for TopicDependencyTable {
    fn default() -> Self {
        Self::default_table()
    }
}
