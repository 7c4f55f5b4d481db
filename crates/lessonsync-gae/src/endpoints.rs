//! URL construction helpers.

use lessonsync_core::structure::ImageLocation;
use url::Url;

use crate::error::GaeResult;

pub const TOPIC_LIST_ENDPOINT: &str = "topic_list";
pub const TOPIC_CONTENT_ENDPOINT: &str = "topic_content";

/// Build `{base_url}/android_data/{endpoint}`.
pub fn build_endpoint_url(base_url: &Url, endpoint: &str) -> GaeResult<Url> {
    Ok(with_trailing_slash(base_url).join(&format!("android_data/{endpoint}"))?)
}

/// Build `{gcs_base_url}/{bucket}/{container}/{entity_id}/assets/{image|thumbnail}/{filename}`.
pub fn build_image_url(gcs_base_url: &Url, bucket: &str, location: &ImageLocation) -> GaeResult<Url> {
    let path = format!(
        "{bucket}/{}/{}/assets/{}/{}",
        location.container_type.path_segment(),
        location.entity_id,
        location.image_type.path_segment(),
        location.filename,
    );
    Ok(with_trailing_slash(gcs_base_url).join(&path)?)
}

fn with_trailing_slash(url: &Url) -> Url {
    let mut url = url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use lessonsync_core::structure::{ImageContainerType, ImageType};

    use super::*;

    #[test]
    fn test_build_endpoint_url() {
        let base = Url::parse("https://backend.test").unwrap();
        assert_eq!(
            build_endpoint_url(&base, TOPIC_LIST_ENDPOINT).unwrap().as_str(),
            "https://backend.test/android_data/topic_list"
        );

        let nested = Url::parse("https://backend.test/prefix").unwrap();
        assert_eq!(
            build_endpoint_url(&nested, TOPIC_CONTENT_ENDPOINT).unwrap().as_str(),
            "https://backend.test/prefix/android_data/topic_content"
        );
    }

    #[test]
    fn test_build_image_url() {
        let base = Url::parse("https://storage.test/").unwrap();
        let location = ImageLocation {
            container_type: ImageContainerType::Exploration,
            image_type: ImageType::HtmlImage,
            entity_id: "exp_1".to_string(),
            filename: "img_1.svg".to_string(),
        };

        assert_eq!(
            build_image_url(&base, "bucket", &location).unwrap().as_str(),
            "https://storage.test/bucket/exploration/exp_1/assets/image/img_1.svg"
        );
    }
}
