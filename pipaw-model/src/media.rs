//! Media value objects.
//!
//! A post carries one or more media fragments. Each fragment offers several
//! renditions of the same asset; accessors pick the one with the most pixels.
//! Dimensions come from `original_width` / `original_height`, not from any
//! rendition.

use crate::entity::{Fields, json_type};
use crate::error::{ModelError, ModelResult, RenditionKind};
use pipaw_types::Pk;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `media_type` of a single photo.
pub const MEDIA_TYPE_PHOTO: u64 = 1;
/// `media_type` of a single video.
pub const MEDIA_TYPE_VIDEO: u64 = 2;
/// `media_type` of an album (carousel).
pub const MEDIA_TYPE_CAROUSEL: u64 = 8;

/// One available size of a media asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaVersion {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl MediaVersion {
    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Highest-pixel rendition. Ties go to the earliest entry.
pub fn best_version(versions: &[MediaVersion], kind: RenditionKind) -> ModelResult<&MediaVersion> {
    versions
        .iter()
        .reduce(|best, v| if v.pixels() > best.pixels() { v } else { best })
        .ok_or(ModelError::NoRenditions { kind })
}

fn versions_at(fragment: &Fields, path: &[&str]) -> ModelResult<Vec<MediaVersion>> {
    let mut current = fragment.get(path[0]);
    for key in &path[1..] {
        current = current.and_then(|v| v.get(*key));
    }
    match current {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(list @ Value::Array(_)) => Vec::<MediaVersion>::deserialize(list).map_err(|e| {
            ModelError::malformed(format!("invalid `{}` entry: {e}", path.join(".")))
        }),
        Some(other) => Err(ModelError::malformed(format!(
            "`{}` is a {}, expected an array",
            path.join("."),
            json_type(other)
        ))),
    }
}

fn dimension(fragment: &Fields, name: &str) -> Option<u32> {
    fragment
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

/// A still image.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    fragment: Fields,
}

impl Photo {
    pub fn new(fragment: Fields) -> Self {
        Self { fragment }
    }

    /// The raw record this value wraps.
    pub fn fragment(&self) -> &Fields {
        &self.fragment
    }

    pub fn pk(&self) -> Option<Pk> {
        self.fragment.get("pk").and_then(Pk::from_value)
    }

    pub fn media_type(&self) -> Option<u64> {
        self.fragment.get("media_type").and_then(Value::as_u64)
    }

    pub fn width(&self) -> Option<u32> {
        dimension(&self.fragment, "original_width")
    }

    pub fn height(&self) -> Option<u32> {
        dimension(&self.fragment, "original_height")
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        Some((self.width()?, self.height()?))
    }

    /// Entries of `image_versions2.candidates`, in the order offered.
    pub fn image_versions(&self) -> ModelResult<Vec<MediaVersion>> {
        versions_at(&self.fragment, &["image_versions2", "candidates"])
    }

    pub fn best_image(&self) -> ModelResult<MediaVersion> {
        let versions = self.image_versions()?;
        best_version(&versions, RenditionKind::Image).cloned()
    }

    /// URL of the best image rendition.
    pub fn url(&self) -> ModelResult<String> {
        Ok(self.best_image()?.url)
    }
}

/// A video. Its fragment also carries image renditions used as thumbnails.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    image: Photo,
}

impl Video {
    pub fn new(fragment: Fields) -> Self {
        Self {
            image: Photo::new(fragment),
        }
    }

    pub fn fragment(&self) -> &Fields {
        self.image.fragment()
    }

    pub fn pk(&self) -> Option<Pk> {
        self.image.pk()
    }

    pub fn width(&self) -> Option<u32> {
        self.image.width()
    }

    pub fn height(&self) -> Option<u32> {
        self.image.height()
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.image.size()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> Option<f64> {
        self.fragment().get("video_duration").and_then(Value::as_f64)
    }

    pub fn view_count(&self) -> Option<u64> {
        self.fragment().get("view_count").and_then(Value::as_u64)
    }

    pub fn play_count(&self) -> Option<u64> {
        self.fragment().get("play_count").and_then(Value::as_u64)
    }

    pub fn has_audio(&self) -> Option<bool> {
        self.fragment().get("has_audio").and_then(Value::as_bool)
    }

    /// Entries of `video_versions`, in the order offered.
    pub fn video_versions(&self) -> ModelResult<Vec<MediaVersion>> {
        versions_at(self.fragment(), &["video_versions"])
    }

    pub fn best_video(&self) -> ModelResult<MediaVersion> {
        let versions = self.video_versions()?;
        best_version(&versions, RenditionKind::Video).cloned()
    }

    /// URL of the best playable rendition.
    pub fn url(&self) -> ModelResult<String> {
        Ok(self.best_video()?.url)
    }

    pub fn best_image(&self) -> ModelResult<MediaVersion> {
        self.image.best_image()
    }

    pub fn thumbnail_url(&self) -> ModelResult<String> {
        self.image.url()
    }
}

/// A single item of a post.
#[derive(Debug, Clone, PartialEq)]
pub enum Media {
    Photo(Photo),
    Video(Video),
}

impl Media {
    /// Wraps a fragment according to its own `media_type`: videos become
    /// [`Media::Video`], everything else [`Media::Photo`].
    pub fn classify(fragment: Fields) -> Self {
        match fragment.get("media_type").and_then(Value::as_u64) {
            Some(MEDIA_TYPE_VIDEO) => Media::Video(Video::new(fragment)),
            _ => Media::Photo(Photo::new(fragment)),
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Media::Video(_))
    }

    pub fn as_photo(&self) -> Option<&Photo> {
        match self {
            Media::Photo(photo) => Some(photo),
            Media::Video(_) => None,
        }
    }

    pub fn as_video(&self) -> Option<&Video> {
        match self {
            Media::Video(video) => Some(video),
            Media::Photo(_) => None,
        }
    }

    pub fn fragment(&self) -> &Fields {
        match self {
            Media::Photo(photo) => photo.fragment(),
            Media::Video(video) => video.fragment(),
        }
    }

    pub fn width(&self) -> Option<u32> {
        match self {
            Media::Photo(photo) => photo.width(),
            Media::Video(video) => video.width(),
        }
    }

    pub fn height(&self) -> Option<u32> {
        match self {
            Media::Photo(photo) => photo.height(),
            Media::Video(video) => video.height(),
        }
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        Some((self.width()?, self.height()?))
    }

    /// Best image URL for photos, best video URL for videos.
    pub fn url(&self) -> ModelResult<String> {
        match self {
            Media::Photo(photo) => photo.url(),
            Media::Video(video) => video.url(),
        }
    }
}
