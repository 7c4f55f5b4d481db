use std::collections::BTreeSet;

use lessonsync_core::content::{SubtitledHtml, SubtitledUnicode};
use lessonsync_core::structure::{ContentLocalizationDto, SubtitledTextDto};

use crate::error::ConvertResult;
use crate::html::fix_image_references;
use crate::localization::{ImageReplacements, single_text, text_set};

/// Reads text out of one default localization while recording every content id
/// that was touched.
///
/// The recorded ids bound which translations and voiceovers are attached to
/// the structure being converted.
#[derive(Debug)]
pub struct ContentIdTracker<'a> {
    localization: &'a ContentLocalizationDto,
    replacements: &'a ImageReplacements,
    content_ids: BTreeSet<String>,
}

impl<'a> ContentIdTracker<'a> {
    pub const fn new(
        localization: &'a ContentLocalizationDto,
        replacements: &'a ImageReplacements,
    ) -> Self {
        Self {
            localization,
            replacements,
            content_ids: BTreeSet::new(),
        }
    }

    /// Html for `text`, with image references repaired.
    pub fn extract_subtitled_html(&mut self, text: &SubtitledTextDto) -> ConvertResult<SubtitledHtml> {
        let html = single_text(self.localization, &text.content_id)?;
        self.track(&text.content_id);
        Ok(SubtitledHtml {
            content_id: text.content_id.clone(),
            html: fix_image_references(html, self.replacements),
        })
    }

    pub fn extract_subtitled_unicode(
        &mut self,
        text: &SubtitledTextDto,
    ) -> ConvertResult<SubtitledUnicode> {
        let unicode_str = single_text(self.localization, &text.content_id)?.to_string();
        self.track(&text.content_id);
        Ok(SubtitledUnicode {
            content_id: text.content_id.clone(),
            unicode_str,
        })
    }

    pub fn extract_string_list(&mut self, content_id: &str) -> ConvertResult<Vec<String>> {
        let texts = text_set(self.localization, content_id)?.to_vec();
        self.track(content_id);
        Ok(texts)
    }

    /// Every content id extracted so far.
    pub const fn content_ids(&self) -> &BTreeSet<String> {
        &self.content_ids
    }

    pub fn into_content_ids(self) -> BTreeSet<String> {
        self.content_ids
    }

    fn track(&mut self, content_id: &str) {
        if !self.content_ids.contains(content_id) {
            self.content_ids.insert(content_id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use lessonsync_core::LanguageType;
    use lessonsync_core::structure::LocalizableTextDto;

    use super::*;
    use crate::error::ConvertError;

    fn localization() -> ContentLocalizationDto {
        let mut loc = ContentLocalizationDto::empty(LanguageType::English);
        loc.localizable_text_content_mapping.insert(
            "content".to_string(),
            LocalizableTextDto::SingleLocalizableText {
                text: "<oppia-noninteractive-image filepath-with-value=\"a.svg\"/>".to_string(),
            },
        );
        loc.localizable_text_content_mapping.insert(
            "answers".to_string(),
            LocalizableTextDto::SetOfLocalizableText {
                texts: vec!["one".to_string(), "1".to_string()],
            },
        );
        loc
    }

    #[test]
    fn test_tracks_only_successful_extractions() {
        let loc = localization();
        let replacements = ImageReplacements::new();
        let mut tracker = ContentIdTracker::new(&loc, &replacements);

        tracker
            .extract_subtitled_html(&SubtitledTextDto::new("content"))
            .unwrap();
        let err = tracker
            .extract_subtitled_html(&SubtitledTextDto::new("answers"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotSingleText { .. }));
        assert_eq!(
            tracker.extract_string_list("answers").unwrap(),
            vec!["one".to_string(), "1".to_string()]
        );

        let ids: Vec<_> = tracker.content_ids().iter().cloned().collect();
        assert_eq!(ids, vec!["answers".to_string(), "content".to_string()]);
    }

    #[test]
    fn test_html_is_repaired() {
        let loc = localization();
        let replacements = ImageReplacements::from([("a.svg".to_string(), "a.png".to_string())]);
        let mut tracker = ContentIdTracker::new(&loc, &replacements);

        let html = tracker
            .extract_subtitled_html(&SubtitledTextDto::new("content"))
            .unwrap();

        assert!(html.html.contains("a.png"));
    }
}
