//! A scripted client for tests.
//!
//! Single-record responses are keyed by pk and replayed on every call. Feed
//! and comment pages are consumed in FIFO order, so a test scripts exactly
//! the pages it expects to be requested.

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use pipaw_types::{Pk, RankToken};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    MediaInfo(Pk),
    UserInfo(Pk),
    UserFeed {
        pk: Pk,
        rank_token: RankToken,
        max_id: Option<String>,
    },
    MediaComments {
        pk: Pk,
        max_id: Option<String>,
    },
}

#[derive(Default)]
struct Script {
    media: HashMap<Pk, Value>,
    users: HashMap<Pk, Value>,
    feed_pages: VecDeque<ClientResult<Value>>,
    comment_pages: VecDeque<ClientResult<Value>>,
    calls: Vec<Call>,
    rank_tokens_issued: usize,
}

/// In-memory [`ApiClient`] replaying scripted responses.
#[derive(Default)]
pub struct ScriptedClient {
    script: Mutex<Script>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `response` for every `media_info(pk)` call.
    pub fn with_media(self, pk: impl Into<Pk>, response: Value) -> Self {
        self.lock().media.insert(pk.into(), response);
        self
    }

    /// Serves `response` for every `user_info(pk)` call.
    pub fn with_user(self, pk: impl Into<Pk>, response: Value) -> Self {
        self.lock().users.insert(pk.into(), response);
        self
    }

    /// Queues the next feed page.
    pub fn push_feed_page(&self, page: Value) {
        self.lock().feed_pages.push_back(Ok(page));
    }

    /// Queues a failure in place of the next feed page.
    pub fn push_feed_error(&self, error: ClientError) {
        self.lock().feed_pages.push_back(Err(error));
    }

    /// Queues the next comment page.
    pub fn push_comment_page(&self, page: Value) {
        self.lock().comment_pages.push_back(Ok(page));
    }

    /// Queues a failure in place of the next comment page.
    pub fn push_comment_error(&self, error: ClientError) {
        self.lock().comment_pages.push_back(Err(error));
    }

    /// Every request made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Feed requests only, in order.
    pub fn feed_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::UserFeed { .. }))
            .collect()
    }

    pub fn rank_tokens_issued(&self) -> usize {
        self.lock().rank_tokens_issued
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ApiClient for ScriptedClient {
    fn media_info(&self, pk: Pk) -> ClientResult<Value> {
        let mut script = self.lock();
        script.calls.push(Call::MediaInfo(pk));
        script
            .media
            .get(&pk)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("media {pk}")))
    }

    fn user_info(&self, pk: Pk) -> ClientResult<Value> {
        let mut script = self.lock();
        script.calls.push(Call::UserInfo(pk));
        script
            .users
            .get(&pk)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("user {pk}")))
    }

    fn user_feed(
        &self,
        pk: Pk,
        rank_token: &RankToken,
        max_id: Option<&str>,
    ) -> ClientResult<Value> {
        let mut script = self.lock();
        script.calls.push(Call::UserFeed {
            pk,
            rank_token: *rank_token,
            max_id: max_id.map(str::to_string),
        });
        script
            .feed_pages
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::NotFound(format!("feed page for user {pk}"))))
    }

    fn media_comments(&self, pk: Pk, max_id: Option<&str>) -> ClientResult<Value> {
        let mut script = self.lock();
        script.calls.push(Call::MediaComments {
            pk,
            max_id: max_id.map(str::to_string),
        });
        script
            .comment_pages
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::NotFound(format!("comment page for media {pk}"))))
    }

    fn new_rank_token(&self) -> RankToken {
        self.lock().rank_tokens_issued += 1;
        RankToken::new()
    }
}
