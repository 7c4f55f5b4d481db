//! Exploration and state conversion.

use std::collections::BTreeMap;
use std::iter;

use lessonsync_core::content::{Exploration, State};
use lessonsync_core::structure::{
    ContentLocalizationDto, ExplorationDto, ExplorationLanguagePackDto, StateDto,
};
use tracing::debug;

use crate::error::ConvertResult;
use crate::interaction::convert_interaction;
use crate::localization::{ImageReplacements, to_recorded_voiceovers, to_written_translations};
use crate::tracker::ContentIdTracker;

/// Converts an exploration and all of its states.
///
/// The exploration itself only keeps translations for its own top-level
/// content ids; each state is converted with a fresh tracker so it keeps only
/// the ids it references.
pub fn convert_exploration(
    dto: &ExplorationDto,
    packs: &[ExplorationLanguagePackDto],
    replacements: &ImageReplacements,
) -> ConvertResult<Exploration> {
    let pack_localizations: Vec<&ContentLocalizationDto> =
        packs.iter().map(|pack| &pack.localization).collect();

    let mut tracker = ContentIdTracker::new(&dto.default_localization, replacements);
    let translatable_title = tracker.extract_subtitled_html(&dto.title)?;

    let states = dto
        .states
        .iter()
        .map(|(name, state)| {
            let converted = convert_state(
                name,
                state,
                &dto.default_localization,
                &pack_localizations,
                replacements,
            )?;
            Ok((name.clone(), converted))
        })
        .collect::<ConvertResult<BTreeMap<_, _>>>()?;

    let written_translations = to_written_translations(
        pack_localizations.iter().copied(),
        replacements,
        Some(tracker.content_ids()),
    )?;

    debug!(
        exploration_id = %dto.id,
        states = states.len(),
        languages = packs.len(),
        "Converted exploration"
    );

    Ok(Exploration {
        id: dto.id.clone(),
        states,
        init_state_name: dto.init_state_name.clone(),
        language_code: dto.default_localization.language.legacy_code()?.to_string(),
        version: dto.content_version,
        translatable_title,
        written_translations,
    })
}

/// Converts one state against its exploration's default localization.
pub fn convert_state(
    name: &str,
    dto: &StateDto,
    default_localization: &ContentLocalizationDto,
    pack_localizations: &[&ContentLocalizationDto],
    replacements: &ImageReplacements,
) -> ConvertResult<State> {
    let mut tracker = ContentIdTracker::new(default_localization, replacements);
    let content = tracker.extract_subtitled_html(&dto.content)?;
    let interaction = convert_interaction(&dto.interaction, name, &mut tracker)?;
    let content_ids = tracker.into_content_ids();

    let recorded_voiceovers = to_recorded_voiceovers(
        pack_localizations
            .iter()
            .copied()
            .chain(iter::once(default_localization)),
        Some(&content_ids),
    )?;
    let written_translations = to_written_translations(
        pack_localizations.iter().copied(),
        replacements,
        Some(&content_ids),
    )?;

    Ok(State {
        name: name.to_string(),
        content,
        interaction,
        recorded_voiceovers,
        written_translations,
    })
}
