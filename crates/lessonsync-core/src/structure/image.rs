//! Image locations in the content asset store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of entity whose asset directory holds an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageContainerType {
    Topic,
    Story,
    Skill,
    Exploration,
}

impl ImageContainerType {
    /// Directory name of this container type in the asset bucket.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Story => "story",
            Self::Skill => "skill",
            Self::Exploration => "exploration",
        }
    }
}

impl fmt::Display for ImageContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    HtmlImage,
    Thumbnail,
}

impl ImageType {
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::HtmlImage => "image",
            Self::Thumbnail => "thumbnail",
        }
    }
}

/// Where one image lives in the asset store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageLocation {
    pub container_type: ImageContainerType,
    pub image_type: ImageType,
    pub entity_id: String,
    pub filename: String,
}
