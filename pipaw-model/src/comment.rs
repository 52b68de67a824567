//! Comments.

use crate::entity::{EntityCore, RemoteEntity, entity_identity, timestamp_field};
use crate::error::ModelResult;
use crate::post::Post;
use crate::user::User;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

/// A comment on a post.
///
/// Comments only arrive embedded in comment pages; the API has no
/// single-comment lookup, so resolving leaves the fields as they are.
#[derive(Clone)]
pub struct Comment<'a> {
    core: EntityCore<'a>,
    post: Post<'a>,
}

entity_identity!(Comment);

impl<'a> Comment<'a> {
    pub fn from_fragment(post: Post<'a>, fragment: Value) -> ModelResult<Self> {
        Ok(Self {
            core: EntityCore::seeded(post.core().api(), fragment)?,
            post,
        })
    }

    /// The post this comment appears in.
    pub fn post(&self) -> &Post<'a> {
        &self.post
    }

    pub fn text(&self) -> ModelResult<Option<String>> {
        self.get_str("text")
    }

    pub fn created(&self) -> ModelResult<DateTime<Utc>> {
        timestamp_field(self, "created_at")
    }

    pub fn user(&self) -> ModelResult<User<'a>> {
        User::from_fragment(self.core.api(), self.require("user")?)
    }
}

impl<'a> RemoteEntity<'a> for Comment<'a> {
    const KIND: &'static str = "comment";

    fn core(&self) -> &EntityCore<'a> {
        &self.core
    }

    fn resolve(&self) -> ModelResult<()> {
        debug!(pk = %self.core.pk(), post = %self.post.pk(), "comments have no lookup endpoint");
        Ok(())
    }
}
