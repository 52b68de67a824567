//! The transport capability consumed by the entity model.

use crate::error::ClientResult;
use pipaw_types::{Pk, RankToken};
use serde_json::Value;

/// Endpoints the entity model needs from an Instagram API session.
///
/// Request shaping, signing and authentication belong to the implementor.
/// Every call blocks until the response is available; implementations are
/// not required to be usable from several threads at once.
pub trait ApiClient {
    /// Fetches a single media record.
    fn media_info(&self, pk: Pk) -> ClientResult<Value>;

    /// Fetches a user record, wrapped as `{"user": {...}}`.
    fn user_info(&self, pk: Pk) -> ClientResult<Value>;

    /// Fetches one page of a user's feed:
    /// `{"items": [...], "next_max_id": cursor}` with the cursor omitted on
    /// the last page.
    fn user_feed(&self, pk: Pk, rank_token: &RankToken, max_id: Option<&str>)
    -> ClientResult<Value>;

    /// Fetches one page of a media's comments:
    /// `{"comments": [...], "next_max_id": cursor}`.
    fn media_comments(&self, pk: Pk, max_id: Option<&str>) -> ClientResult<Value>;

    /// Returns a fresh correlation token for a new feed sweep.
    fn new_rank_token(&self) -> RankToken {
        RankToken::new()
    }
}

impl<C: ApiClient + ?Sized> ApiClient for &C {
    fn media_info(&self, pk: Pk) -> ClientResult<Value> {
        (**self).media_info(pk)
    }

    fn user_info(&self, pk: Pk) -> ClientResult<Value> {
        (**self).user_info(pk)
    }

    fn user_feed(
        &self,
        pk: Pk,
        rank_token: &RankToken,
        max_id: Option<&str>,
    ) -> ClientResult<Value> {
        (**self).user_feed(pk, rank_token, max_id)
    }

    fn media_comments(&self, pk: Pk, max_id: Option<&str>) -> ClientResult<Value> {
        (**self).media_comments(pk, max_id)
    }

    fn new_rank_token(&self) -> RankToken {
        (**self).new_rank_token()
    }
}
