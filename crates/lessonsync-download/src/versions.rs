//! Captures the content versions of a catalog into a `DownloadListVersions` manifest.

use std::collections::BTreeMap;

use lessonsync_core::TopicListResponse;
use lessonsync_core::manifest::{
    ChapterInfo, DownloadListVersions, SkillInfo, StoryInfo, SubtopicInfo, TopicInfo,
};
use lessonsync_core::structure::{DownloadableTopicSummaryDto, SkillSummaryDto};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionCaptureError {
    /// Two topics reference the same skill id with different summaries.
    #[error("Skill {skill_id} is referenced by topics {} with divergent structures", topic_ids.join(", "))]
    DivergentSkill {
        skill_id: String,
        topic_ids: Vec<String>,
    },
}

/// Snapshots versions of every downloadable topic and its referenced skills.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionCaptureService;

impl VersionCaptureService {
    pub const fn new() -> Self {
        Self
    }

    /// Future topics and topics requiring an app update are ignored. Skills
    /// appear once per id, sorted by id.
    pub fn capture_versions(
        &self,
        list_response: &TopicListResponse,
    ) -> Result<DownloadListVersions, VersionCaptureError> {
        let topics: Vec<&DownloadableTopicSummaryDto> =
            list_response.downloadable_topics().collect();

        let mut skills: BTreeMap<&str, (&SkillSummaryDto, Vec<&str>)> = BTreeMap::new();
        for topic in &topics {
            for skill in &topic.referenced_skills {
                let (first, topic_ids) = skills
                    .entry(skill.id.as_str())
                    .or_insert_with(|| (skill, Vec::new()));
                topic_ids.push(topic.id.as_str());
                if *first != skill {
                    return Err(VersionCaptureError::DivergentSkill {
                        skill_id: skill.id.clone(),
                        topic_ids: topic_ids.iter().map(ToString::to_string).collect(),
                    });
                }
            }
        }

        let versions = DownloadListVersions {
            topic_version_list: topics.iter().map(|topic| topic_info(topic)).collect(),
            skill_version_list: skills
                .into_values()
                .map(|(skill, _)| SkillInfo {
                    id: skill.id.clone(),
                    content_version: skill.content_version,
                })
                .collect(),
        };
        debug!(
            topics = versions.topic_version_list.len(),
            skills = versions.skill_version_list.len(),
            "Captured content versions"
        );
        Ok(versions)
    }
}

fn topic_info(topic: &DownloadableTopicSummaryDto) -> TopicInfo {
    TopicInfo {
        id: topic.id.clone(),
        content_version: topic.content_version,
        story_info: topic
            .story_summaries
            .iter()
            .map(|story| StoryInfo {
                id: story.id.clone(),
                content_version: story.content_version,
                chapter_info: story
                    .chapters
                    .iter()
                    .map(|chapter| ChapterInfo {
                        exploration_id: chapter.exploration_id.clone(),
                        content_version: chapter.content_version,
                    })
                    .collect(),
            })
            .collect(),
        subtopic_info: topic
            .subtopic_summaries
            .iter()
            .map(|subtopic| SubtopicInfo {
                index: subtopic.index,
                content_version: subtopic.content_version,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use lessonsync_core::LanguageType;
    use lessonsync_core::api::{
        AvailableTopicDto, DownloadableTopicDto, FutureTopicDto, ProtoVersion,
        TopicRequiresAppUpdateDto,
    };
    use lessonsync_core::structure::{
        ChapterSummaryDto, ContentLocalizationDto, ContentLocalizationsDto, StorySummaryDto,
        SubtitledTextDto, UpcomingTopicSummaryDto,
    };

    use super::*;

    fn localizations() -> ContentLocalizationsDto {
        ContentLocalizationsDto {
            default_mapping: ContentLocalizationDto::empty(LanguageType::English),
            localizations: Vec::new(),
        }
    }

    fn skill(id: &str, content_version: u32) -> SkillSummaryDto {
        SkillSummaryDto {
            id: id.to_string(),
            name: SubtitledTextDto::new("skill_name"),
            content_version,
            localizations: localizations(),
        }
    }

    fn downloadable(id: &str, skills: Vec<SkillSummaryDto>) -> AvailableTopicDto {
        AvailableTopicDto::DownloadableTopic(DownloadableTopicDto {
            topic_id: id.to_string(),
            topic_summary: DownloadableTopicSummaryDto {
                id: id.to_string(),
                name: SubtitledTextDto::new("name"),
                description: SubtitledTextDto::new("description"),
                content_version: 4,
                localizations: localizations(),
                story_summaries: vec![StorySummaryDto {
                    id: format!("{id}_story"),
                    title: SubtitledTextDto::new("title"),
                    description: SubtitledTextDto::new("description"),
                    content_version: 2,
                    chapters: vec![ChapterSummaryDto {
                        title: SubtitledTextDto::new("title"),
                        description: SubtitledTextDto::new("description"),
                        exploration_id: format!("{id}_exp"),
                        content_version: 9,
                        localizations: localizations(),
                    }],
                    localizations: localizations(),
                }],
                subtopic_summaries: Vec::new(),
                referenced_skills: skills,
            },
            download_size_bytes: 0,
        })
    }

    fn response(available_topics: Vec<AvailableTopicDto>) -> TopicListResponse {
        TopicListResponse {
            proto_version: ProtoVersion::new(1),
            available_topics,
            future_topics: vec![FutureTopicDto {
                topic_id: "future".to_string(),
                topic_summary: UpcomingTopicSummaryDto {
                    id: "future".to_string(),
                    name: SubtitledTextDto::new("name"),
                    description: SubtitledTextDto::new("description"),
                    content_version: 1,
                    localizations: localizations(),
                    expected_release_date_millis: None,
                },
            }],
        }
    }

    #[test]
    fn test_captures_downloadable_topics_only() {
        let list = response(vec![
            downloadable("b_topic", vec![skill("z_skill", 1), skill("a_skill", 2)]),
            AvailableTopicDto::TopicRequiresAppUpdate(TopicRequiresAppUpdateDto {
                topic_id: "needs_update".to_string(),
            }),
            downloadable("a_topic", vec![skill("a_skill", 2)]),
        ]);

        let versions = VersionCaptureService::new().capture_versions(&list).unwrap();

        let topic_ids: Vec<_> = versions
            .topic_version_list
            .iter()
            .map(|topic| topic.id.as_str())
            .collect();
        assert_eq!(topic_ids, ["b_topic", "a_topic"]);
        let story = &versions.topic_version_list[0].story_info[0];
        assert_eq!(story.content_version, 2);
        assert_eq!(story.chapter_info[0].exploration_id, "b_topic_exp");
        assert_eq!(story.chapter_info[0].content_version, 9);
        assert_eq!(
            versions.skill_version_list,
            vec![
                SkillInfo {
                    id: "a_skill".to_string(),
                    content_version: 2
                },
                SkillInfo {
                    id: "z_skill".to_string(),
                    content_version: 1
                },
            ]
        );
    }

    #[test]
    fn test_divergent_skill_fails() {
        let list = response(vec![
            downloadable("topic_1", vec![skill("shared", 1)]),
            downloadable("topic_2", vec![skill("shared", 2)]),
        ]);

        let err = VersionCaptureService::new()
            .capture_versions(&list)
            .unwrap_err();

        assert_eq!(
            err,
            VersionCaptureError::DivergentSkill {
                skill_id: "shared".to_string(),
                topic_ids: vec!["topic_1".to_string(), "topic_2".to_string()],
            }
        );
    }
}
