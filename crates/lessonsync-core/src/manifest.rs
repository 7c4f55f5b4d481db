//! The `DownloadListVersions` manifest: content versions of everything in the catalog.

use serde::{Deserialize, Serialize};

use crate::textproto::{TextFormat, TextFormatWriter};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadListVersions {
    pub topic_version_list: Vec<TopicInfo>,
    pub skill_version_list: Vec<SkillInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicInfo {
    pub id: String,
    pub content_version: u32,
    pub story_info: Vec<StoryInfo>,
    pub subtopic_info: Vec<SubtopicInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryInfo {
    pub id: String,
    pub content_version: u32,
    pub chapter_info: Vec<ChapterInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub exploration_id: String,
    pub content_version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtopicInfo {
    pub index: u32,
    pub content_version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillInfo {
    pub id: String,
    pub content_version: u32,
}

impl TextFormat for DownloadListVersions {
    fn write_fields(&self, writer: &mut TextFormatWriter) {
        for topic in &self.topic_version_list {
            writer.message("topic_version_list", topic);
        }
        for skill in &self.skill_version_list {
            writer.message("skill_version_list", skill);
        }
    }
}

impl TextFormat for TopicInfo {
    fn write_fields(&self, writer: &mut TextFormatWriter) {
        writer.string_field("id", &self.id);
        writer.uint_field("content_version", u64::from(self.content_version));
        for story in &self.story_info {
            writer.message("story_info", story);
        }
        for subtopic in &self.subtopic_info {
            writer.message("subtopic_info", subtopic);
        }
    }
}

impl TextFormat for StoryInfo {
    fn write_fields(&self, writer: &mut TextFormatWriter) {
        writer.string_field("id", &self.id);
        writer.uint_field("content_version", u64::from(self.content_version));
        for chapter in &self.chapter_info {
            writer.message("chapter_info", chapter);
        }
    }
}

impl TextFormat for ChapterInfo {
    fn write_fields(&self, writer: &mut TextFormatWriter) {
        writer.string_field("exploration_id", &self.exploration_id);
        writer.uint_field("content_version", u64::from(self.content_version));
    }
}

impl TextFormat for SubtopicInfo {
    fn write_fields(&self, writer: &mut TextFormatWriter) {
        writer.uint_field("index", u64::from(self.index));
        writer.uint_field("content_version", u64::from(self.content_version));
    }
}

impl TextFormat for SkillInfo {
    fn write_fields(&self, writer: &mut TextFormatWriter) {
        writer.string_field("id", &self.id);
        writer.uint_field("content_version", u64::from(self.content_version));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_text_format() {
        let versions = DownloadListVersions {
            topic_version_list: vec![TopicInfo {
                id: "topic".into(),
                content_version: 3,
                story_info: vec![StoryInfo {
                    id: "story".into(),
                    content_version: 2,
                    chapter_info: vec![ChapterInfo {
                        exploration_id: "exp".into(),
                        content_version: 7,
                    }],
                }],
                subtopic_info: vec![SubtopicInfo {
                    index: 1,
                    content_version: 1,
                }],
            }],
            skill_version_list: vec![SkillInfo {
                id: "skill".into(),
                content_version: 5,
            }],
        };

        let expected = "\
topic_version_list {
  id: \"topic\"
  content_version: 3
  story_info {
    id: \"story\"
    content_version: 2
    chapter_info {
      exploration_id: \"exp\"
      content_version: 7
    }
  }
  subtopic_info {
    index: 1
    content_version: 1
  }
}
skill_version_list {
  id: \"skill\"
  content_version: 5
}
";
        assert_eq!(versions.to_text_format(), expected);
    }
}
