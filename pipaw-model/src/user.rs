//! Users.

use crate::entity::{EntityCore, Fields, RemoteEntity, entity_identity, into_object};
use crate::error::{ModelError, ModelResult};
use crate::feed::UserFeed;
use pipaw_client::ApiClient;
use pipaw_types::Pk;
use serde_json::Value;
use tracing::debug;

/// An account.
#[derive(Clone)]
pub struct User<'a> {
    core: EntityCore<'a>,
}

entity_identity!(User);

impl<'a> User<'a> {
    /// A user known only by pk; fields load on first access.
    pub fn new(api: &'a dyn ApiClient, pk: impl Into<Pk>) -> Self {
        Self {
            core: EntityCore::stub(api, pk.into()),
        }
    }

    /// A user from initial data, optionally checked against an explicit pk.
    pub fn with_data(api: &'a dyn ApiClient, pk: Option<Pk>, data: Fields) -> ModelResult<Self> {
        Ok(Self {
            core: EntityCore::new(api, pk, Some(data))?,
        })
    }

    /// A user seeded from a record embedded in another response.
    pub fn from_fragment(api: &'a dyn ApiClient, fragment: Value) -> ModelResult<Self> {
        Ok(Self {
            core: EntityCore::seeded(api, fragment)?,
        })
    }

    pub fn username(&self) -> ModelResult<Option<String>> {
        self.get_str("username")
    }

    pub fn full_name(&self) -> ModelResult<Option<String>> {
        self.get_str("full_name")
    }

    pub fn is_private(&self) -> ModelResult<Option<bool>> {
        self.get_bool("is_private")
    }

    pub fn media_count(&self) -> ModelResult<Option<u64>> {
        self.get_u64("media_count")
    }

    pub fn follower_count(&self) -> ModelResult<Option<u64>> {
        self.get_u64("follower_count")
    }

    /// Profile URL.
    pub fn link(&self) -> ModelResult<String> {
        let username = self
            .username()?
            .ok_or_else(|| ModelError::MissingField("username".to_string()))?;
        Ok(format!("https://www.instagram.com/{username}/"))
    }

    /// The account's posts, newest first.
    ///
    /// Each call starts a new sweep with its own rank token. No request is
    /// made until the returned iterator is first advanced.
    pub fn posts(&self) -> UserFeed<'a> {
        UserFeed::new(self.core.api(), self.core.pk())
    }
}

impl<'a> RemoteEntity<'a> for User<'a> {
    const KIND: &'static str = "user";

    fn core(&self) -> &EntityCore<'a> {
        &self.core
    }

    fn resolve(&self) -> ModelResult<()> {
        debug!(pk = %self.core.pk(), "fetching user info");
        let response = self.core.api().user_info(self.core.pk())?;
        let mut response = into_object(response, "user_info response")?;
        let user = response
            .remove("user")
            .ok_or_else(|| ModelError::malformed("user_info response has no `user` record"))?;
        self.core.replace(into_object(user, "user_info `user` record")?);
        Ok(())
    }
}
