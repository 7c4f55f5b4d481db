//! Repair of image filenames embedded in rich-text html.
//!
//! Only the bounded custom-tag vocabulary that can reference image assets is
//! scanned. Each tag element spans from `<tag` up to the first `/>` or `</tag`
//! after it; a replacement is applied only inside those spans.

use std::ops::Range;

use crate::localization::ImageReplacements;

const IMAGE_TAGS: [&str; 2] = ["oppia-noninteractive-image", "oppia-noninteractive-math"];

/// Rewrites old image filenames referenced by image and math tags in `html`.
///
/// For each tag element the first replacement key (in key order) that occurs
/// in the element is substituted everywhere within that element.
pub fn fix_image_references(html: &str, replacements: &ImageReplacements) -> String {
    if replacements.is_empty() {
        return html.to_string();
    }
    IMAGE_TAGS
        .iter()
        .fold(html.to_string(), |fixed, tag| fix_tag(&fixed, tag, replacements))
}

/// Applies [`fix_image_references`] to every entry of a list.
pub fn fix_image_references_in_list(
    html_list: &[String],
    replacements: &ImageReplacements,
) -> Vec<String> {
    html_list
        .iter()
        .map(|html| fix_image_references(html, replacements))
        .collect()
}

fn fix_tag(html: &str, tag: &str, replacements: &ImageReplacements) -> String {
    let mut fixed = html.to_string();
    // Back to front so earlier ranges stay valid as lengths change.
    for range in find_tag_ranges(html, tag).into_iter().rev() {
        let element = &html[range.clone()];
        let replacement = replacements
            .iter()
            .find(|(old_filename, _)| element.contains(old_filename.as_str()));
        if let Some((old_filename, new_filename)) = replacement {
            let repaired = element.replace(old_filename.as_str(), new_filename);
            fixed.replace_range(range, &repaired);
        }
    }
    fixed
}

fn find_tag_ranges(html: &str, tag: &str) -> Vec<Range<usize>> {
    let open = format!("<{tag}");
    let close = format!("</{tag}");
    let mut ranges = Vec::new();
    let mut search_from = 0;
    while let Some(offset) = html[search_from..].find(&open) {
        let start = search_from + offset;
        let element = &html[start..];
        let end = [element.find("/>"), element.find(&close)]
            .into_iter()
            .flatten()
            .min();
        let Some(end) = end else {
            break;
        };
        ranges.push(start..start + end);
        search_from = start + end;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(pairs: &[(&str, &str)]) -> ImageReplacements {
        pairs
            .iter()
            .map(|(old, new)| ((*old).to_string(), (*new).to_string()))
            .collect()
    }

    #[test]
    fn test_replaces_filename_inside_image_tag() {
        let html = r#"<p>See img_1.svg</p><oppia-noninteractive-image filepath-with-value="&amp;quot;img_1.svg&amp;quot;"></oppia-noninteractive-image>"#;
        let fixed = fix_image_references(html, &replacements(&[("img_1.svg", "img_1.png")]));
        assert_eq!(
            fixed,
            r#"<p>See img_1.svg</p><oppia-noninteractive-image filepath-with-value="&amp;quot;img_1.png&amp;quot;"></oppia-noninteractive-image>"#
        );
    }

    #[test]
    fn test_replaces_in_self_closing_math_tags() {
        let html = r#"<oppia-noninteractive-math math_content-with-value="{&amp;quot;svg_filename&amp;quot;:&amp;quot;m.svg&amp;quot;}"/> and <oppia-noninteractive-math math_content-with-value="m.svg"/>"#;
        let fixed = fix_image_references(html, &replacements(&[("m.svg", "m_2.svg")]));
        assert_eq!(fixed.matches("m_2.svg").count(), 2);
        assert!(!fixed.contains("\"m.svg\""));
    }

    #[test]
    fn test_unterminated_tag_is_left_alone() {
        let html = r#"<oppia-noninteractive-image filepath-with-value="a.svg""#;
        let fixed = fix_image_references(html, &replacements(&[("a.svg", "b.png")]));
        assert_eq!(fixed, html);
    }

    #[test]
    fn test_empty_replacements_return_input() {
        let html = "<oppia-noninteractive-image x=\"a.svg\"/>";
        assert_eq!(fix_image_references(html, &ImageReplacements::new()), html);
    }

    #[test]
    fn test_multiple_elements_with_different_files() {
        let html = "<oppia-noninteractive-image v=\"a.gif\"/><oppia-noninteractive-image v=\"b.gif\"/>";
        let fixed = fix_image_references(
            html,
            &replacements(&[("a.gif", "a.png"), ("b.gif", "b.png")]),
        );
        assert_eq!(
            fixed,
            "<oppia-noninteractive-image v=\"a.png\"/><oppia-noninteractive-image v=\"b.png\"/>"
        );
    }
}
