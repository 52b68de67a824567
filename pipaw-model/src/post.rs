//! Posts.

use crate::entity::{
    EntityCore, Fields, RemoteEntity, entity_identity, into_object, timestamp_field,
};
use crate::error::{ModelError, ModelResult};
use crate::feed::CommentFeed;
use crate::media::{MEDIA_TYPE_CAROUSEL, Media};
use crate::user::User;
use chrono::{DateTime, Utc};
use pipaw_client::ApiClient;
use pipaw_types::Pk;
use serde_json::Value;
use tracing::debug;

/// A single post. Holds up to ten photos or videos, see [`Post::medias`].
#[derive(Clone)]
pub struct Post<'a> {
    core: EntityCore<'a>,
}

entity_identity!(Post);

impl<'a> Post<'a> {
    /// A post known only by pk; fields load on first access.
    pub fn new(api: &'a dyn ApiClient, pk: impl Into<Pk>) -> Self {
        Self {
            core: EntityCore::stub(api, pk.into()),
        }
    }

    /// A post from initial data, optionally checked against an explicit pk.
    pub fn with_data(api: &'a dyn ApiClient, pk: Option<Pk>, data: Fields) -> ModelResult<Self> {
        Ok(Self {
            core: EntityCore::new(api, pk, Some(data))?,
        })
    }

    /// A post seeded from a record embedded in another response.
    pub fn from_fragment(api: &'a dyn ApiClient, fragment: Value) -> ModelResult<Self> {
        Ok(Self {
            core: EntityCore::seeded(api, fragment)?,
        })
    }

    /// Shortcode used in public URLs.
    pub fn code(&self) -> ModelResult<Option<String>> {
        self.get_str("code")
    }

    pub fn link(&self) -> ModelResult<String> {
        let code = self
            .code()?
            .ok_or_else(|| ModelError::MissingField("code".to_string()))?;
        Ok(format!("https://www.instagram.com/p/{code}/"))
    }

    pub fn media_type(&self) -> ModelResult<Option<u64>> {
        self.get_u64("media_type")
    }

    /// When the post was published (`taken_at`).
    pub fn created(&self) -> ModelResult<DateTime<Utc>> {
        timestamp_field(self, "taken_at")
    }

    /// The author, seeded from the embedded `user` record.
    pub fn user(&self) -> ModelResult<User<'a>> {
        let fragment = self.require("user")?;
        User::from_fragment(self.core.api(), fragment)
    }

    pub fn caption_text(&self) -> ModelResult<Option<String>> {
        Ok(self
            .get("caption")?
            .and_then(|caption| caption.get("text").and_then(Value::as_str).map(str::to_string)))
    }

    pub fn like_count(&self) -> ModelResult<Option<u64>> {
        self.get_u64("like_count")
    }

    pub fn comment_count(&self) -> ModelResult<Option<u64>> {
        self.get_u64("comment_count")
    }

    /// Photos and videos of the post.
    ///
    /// Albums yield one entry per carousel item; any other post yields a
    /// single entry built from the post's own record.
    pub fn medias(&self) -> ModelResult<Vec<Media>> {
        if self.media_type()? == Some(MEDIA_TYPE_CAROUSEL) {
            let carousel = self.require("carousel_media")?;
            let Value::Array(entries) = carousel else {
                return Err(ModelError::malformed("`carousel_media` is not an array"));
            };
            entries
                .into_iter()
                .map(|entry| into_object(entry, "carousel entry").map(Media::classify))
                .collect()
        } else {
            Ok(vec![Media::classify(self.core.snapshot())])
        }
    }

    /// Comments on this post, fetched page by page.
    pub fn comments(&self) -> CommentFeed<'a> {
        CommentFeed::new(self.clone())
    }
}

impl<'a> RemoteEntity<'a> for Post<'a> {
    const KIND: &'static str = "post";

    fn core(&self) -> &EntityCore<'a> {
        &self.core
    }

    fn resolve(&self) -> ModelResult<()> {
        debug!(pk = %self.core.pk(), "fetching media info");
        let response = self.core.api().media_info(self.core.pk())?;
        self.core.replace(into_object(response, "media_info response")?);
        Ok(())
    }
}
