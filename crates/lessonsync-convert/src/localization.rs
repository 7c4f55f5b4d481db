//! Helpers that read localizations and regroup per-language packs by content id.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use lessonsync_core::content::{
    LessonThumbnail, RecordedVoiceovers, SubtitledHtml, Translation, Voiceover,
    WrittenTranslations,
};
use lessonsync_core::structure::{
    ContentLocalizationDto, LocalizableTextDto, SubtitledTextDto, ThumbnailDto,
};

use crate::error::{ConvertError, ConvertResult};
use crate::html::{fix_image_references, fix_image_references_in_list};

/// Old image filename to the filename it was stored under.
pub type ImageReplacements = BTreeMap<String, String>;

/// Looks up the localized text for `content_id`.
pub(crate) fn lookup_text<'a>(
    localization: &'a ContentLocalizationDto,
    content_id: &str,
) -> ConvertResult<&'a LocalizableTextDto> {
    localization
        .localizable_text_content_mapping
        .get(content_id)
        .ok_or_else(|| ConvertError::MissingContent {
            content_id: content_id.to_string(),
        })
}

pub(crate) fn single_text<'a>(
    localization: &'a ContentLocalizationDto,
    content_id: &str,
) -> ConvertResult<&'a str> {
    match lookup_text(localization, content_id)? {
        LocalizableTextDto::SingleLocalizableText { text } => Ok(text),
        LocalizableTextDto::SetOfLocalizableText { .. } => Err(ConvertError::NotSingleText {
            content_id: content_id.to_string(),
        }),
    }
}

pub(crate) fn text_set<'a>(
    localization: &'a ContentLocalizationDto,
    content_id: &str,
) -> ConvertResult<&'a [String]> {
    match lookup_text(localization, content_id)? {
        LocalizableTextDto::SetOfLocalizableText { texts } => Ok(texts),
        LocalizableTextDto::SingleLocalizableText { .. } => Err(ConvertError::NotTextSet {
            content_id: content_id.to_string(),
        }),
    }
}

/// Reads untracked html from a default localization.
///
/// Used for summary-level titles and descriptions, which carry no images and
/// never have their content ids filtered.
pub(crate) fn default_html(
    localization: &ContentLocalizationDto,
    text: &SubtitledTextDto,
) -> ConvertResult<SubtitledHtml> {
    Ok(SubtitledHtml {
        content_id: text.content_id.clone(),
        html: single_text(localization, &text.content_id)?.to_string(),
    })
}

/// Builds a map from items keyed by `key`, rejecting duplicate keys.
pub(crate) fn associate_uniquely<T, K, V>(
    items: impl IntoIterator<Item = T>,
    mut key: impl FnMut(&T) -> ConvertResult<K>,
    mut value: impl FnMut(T) -> ConvertResult<V>,
) -> ConvertResult<BTreeMap<K, V>>
where
    K: Ord + Display,
{
    let mut associated = BTreeMap::new();
    for item in items {
        let item_key = key(&item)?;
        if associated.contains_key(&item_key) {
            return Err(ConvertError::DuplicateKey {
                key: item_key.to_string(),
            });
        }
        let item_value = value(item)?;
        associated.insert(item_key, item_value);
    }
    Ok(associated)
}

/// Turns `{outer -> {inner -> v}}` into `{inner -> {outer -> v}}`.
pub(crate) fn flip_mapping<A, B, V>(mapping: BTreeMap<A, BTreeMap<B, V>>) -> BTreeMap<B, BTreeMap<A, V>>
where
    A: Ord + Clone,
    B: Ord,
{
    let mut flipped: BTreeMap<B, BTreeMap<A, V>> = BTreeMap::new();
    for (outer, inner_map) in mapping {
        for (inner, value) in inner_map {
            flipped.entry(inner).or_default().insert(outer.clone(), value);
        }
    }
    flipped
}

fn translation_of(text: &LocalizableTextDto, replacements: &ImageReplacements) -> Translation {
    match text {
        LocalizableTextDto::SingleLocalizableText { text } => {
            Translation::Html(fix_image_references(text, replacements))
        }
        LocalizableTextDto::SetOfLocalizableText { texts } => {
            Translation::HtmlList(fix_image_references_in_list(texts, replacements))
        }
    }
}

fn keep(filter: Option<&BTreeSet<String>>, content_id: &str) -> bool {
    filter.is_none_or(|ids| ids.contains(content_id))
}

/// Regroups localized texts by content id, keyed by legacy language code.
///
/// When `filter` is set only those content ids are kept.
pub(crate) fn to_written_translations<'a>(
    localizations: impl IntoIterator<Item = &'a ContentLocalizationDto>,
    replacements: &ImageReplacements,
    filter: Option<&BTreeSet<String>>,
) -> ConvertResult<WrittenTranslations> {
    let by_language = associate_uniquely(
        localizations,
        |localization| Ok(localization.language.legacy_code()?.to_string()),
        |localization| {
            Ok(localization
                .localizable_text_content_mapping
                .iter()
                .filter(|(content_id, _)| keep(filter, content_id))
                .map(|(content_id, text)| (content_id.clone(), translation_of(text, replacements)))
                .collect::<BTreeMap<_, _>>())
        },
    )?;
    Ok(flip_mapping(by_language))
}

/// Regroups voiceovers by content id, keyed by voiceover language code.
pub(crate) fn to_recorded_voiceovers<'a>(
    localizations: impl IntoIterator<Item = &'a ContentLocalizationDto>,
    filter: Option<&BTreeSet<String>>,
) -> ConvertResult<RecordedVoiceovers> {
    let by_language = associate_uniquely(
        localizations,
        |localization| Ok(localization.language.voiceover_code()?.to_string()),
        |localization| {
            Ok(localization
                .voiceover_content_mapping
                .iter()
                .filter(|(content_id, _)| keep(filter, content_id))
                .map(|(content_id, file)| {
                    let voiceover = Voiceover {
                        file_name: file.filename.clone(),
                        file_size_bytes: file.file_size_bytes,
                    };
                    (content_id.clone(), voiceover)
                })
                .collect::<BTreeMap<_, _>>())
        },
    )?;
    Ok(flip_mapping(by_language))
}

/// Converts a thumbnail, substituting its filename when it was renamed.
pub(crate) fn to_thumbnail(
    thumbnail: Option<&ThumbnailDto>,
    replacements: &ImageReplacements,
) -> Option<LessonThumbnail> {
    thumbnail.map(|thumbnail| {
        let filename = &thumbnail.referenced_image.filename;
        LessonThumbnail {
            thumbnail_filename: replacements
                .get(filename)
                .unwrap_or(filename)
                .clone(),
            background_color_rgb: thumbnail.background_color_rgb,
        }
    })
}
