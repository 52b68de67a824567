//! Cursor-based pagination.
//!
//! Feeds are pulled one page at a time. A page is requested only when the
//! consumer asks for an item and everything from the previous page has been
//! handed out; nothing is prefetched. A response without `next_max_id` is
//! the last page, even if earlier pages were empty.

use crate::comment::Comment;
use crate::entity::{RemoteEntity, json_type};
use crate::error::{ModelError, ModelResult};
use crate::post::Post;
use pipaw_client::ApiClient;
use pipaw_types::{Pk, RankToken};
use serde_json::Value;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use tracing::{debug, warn};

/// Cursor field of every paginated response.
pub const NEXT_MAX_ID: &str = "next_max_id";

/// One parsed response page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub next_max_id: Option<String>,
}

impl Page {
    /// Splits a response into its item list (under `items_key`) and cursor.
    ///
    /// A missing or `null` item list is an empty page; a `null` cursor counts
    /// as absent. Integer cursors are kept in their decimal form.
    pub fn parse(response: Value, items_key: &str) -> ModelResult<Self> {
        let Value::Object(mut map) = response else {
            return Err(ModelError::malformed(format!(
                "page response is a {}, expected an object",
                json_type(&response)
            )));
        };

        let items = match map.remove(items_key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ModelError::malformed(format!(
                    "`{items_key}` is a {}, expected an array",
                    json_type(&other)
                )));
            }
        };

        let next_max_id = match map.remove(NEXT_MAX_ID) {
            None | Some(Value::Null) => None,
            Some(Value::String(cursor)) => Some(cursor),
            Some(Value::Number(cursor)) => Some(cursor.to_string()),
            Some(other) => {
                return Err(ModelError::malformed(format!(
                    "`{NEXT_MAX_ID}` is a {}, expected a string",
                    json_type(&other)
                )));
            }
        };

        Ok(Self { items, next_max_id })
    }
}

/// Paging state: items left from the current page and where to go next.
#[derive(Debug, Default)]
struct Cursor {
    pending: VecDeque<Value>,
    next_max_id: Option<String>,
    pages: usize,
    done: bool,
}

impl Cursor {
    /// Next raw item, fetching pages as needed.
    ///
    /// A failed fetch is returned once and ends the sequence.
    fn next_item<F>(&mut self, items_key: &str, mut fetch: F) -> Option<ModelResult<Value>>
    where
        F: FnMut(Option<&str>) -> ModelResult<Value>,
    {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }

            let max_id = self.next_max_id.take();
            let page =
                fetch(max_id.as_deref()).and_then(|response| Page::parse(response, items_key));
            match page {
                Ok(page) => {
                    self.pages += 1;
                    debug!(
                        page = self.pages,
                        items = page.items.len(),
                        more = page.next_max_id.is_some(),
                        "page received"
                    );
                    self.pending.extend(page.items);
                    match page.next_max_id {
                        Some(cursor) => self.next_max_id = Some(cursor),
                        None => self.done = true,
                    }
                }
                Err(err) => {
                    warn!(page = self.pages + 1, error = %err, "page fetch failed, ending feed");
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// A user's posts, newest first.
///
/// Single-pass: once exhausted it stays exhausted. Call
/// [`User::posts`](crate::User::posts) again for a fresh sweep.
pub struct UserFeed<'a> {
    api: &'a dyn ApiClient,
    pk: Pk,
    rank_token: RankToken,
    cursor: Cursor,
}

impl<'a> UserFeed<'a> {
    pub(crate) fn new(api: &'a dyn ApiClient, pk: Pk) -> Self {
        Self {
            api,
            pk,
            rank_token: api.new_rank_token(),
            cursor: Cursor::default(),
        }
    }

    /// Owner of the feed.
    pub fn user_pk(&self) -> Pk {
        self.pk
    }

    /// Correlation token sent with every page of this sweep.
    pub fn rank_token(&self) -> &RankToken {
        &self.rank_token
    }

    /// Pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.cursor.pages
    }
}

impl<'a> Iterator for UserFeed<'a> {
    type Item = ModelResult<Post<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let (api, pk, rank_token) = (self.api, self.pk, self.rank_token);
        let item = self.cursor.next_item("items", |max_id| {
            debug!(%pk, max_id, "fetching user feed page");
            Ok(api.user_feed(pk, &rank_token, max_id)?)
        })?;
        Some(item.and_then(|fragment| {
            Post::from_fragment(api, fragment).inspect_err(|err| {
                warn!(user = %pk, error = %err, "unusable feed item");
            })
        }))
    }
}

impl FusedIterator for UserFeed<'_> {}

/// Comments on a post, in the order the API returns them.
pub struct CommentFeed<'a> {
    post: Post<'a>,
    cursor: Cursor,
}

impl<'a> CommentFeed<'a> {
    pub(crate) fn new(post: Post<'a>) -> Self {
        Self {
            post,
            cursor: Cursor::default(),
        }
    }

    pub fn post(&self) -> &Post<'a> {
        &self.post
    }

    pub fn pages_fetched(&self) -> usize {
        self.cursor.pages
    }
}

impl<'a> Iterator for CommentFeed<'a> {
    type Item = ModelResult<Comment<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let api = self.post.core().api();
        let pk = self.post.pk();
        let item = self.cursor.next_item("comments", |max_id| {
            debug!(%pk, max_id, "fetching comment page");
            Ok(api.media_comments(pk, max_id)?)
        })?;
        Some(item.and_then(|fragment| {
            Comment::from_fragment(self.post.clone(), fragment).inspect_err(|err| {
                warn!(post = %pk, error = %err, "unusable comment");
            })
        }))
    }
}

impl FusedIterator for CommentFeed<'_> {}
