//! Lazily resolved entity model for the Instagram private API.
//!
//! Remote records are represented by handles identified by primary key:
//! - [`User`] — an account; [`User::posts`] walks its feed page by page
//! - [`Post`] — a post; [`Post::medias`] exposes its photos and videos
//! - [`Comment`] — a comment, reached through [`Post::comments`]
//! - [`Media`] — a [`Photo`] or [`Video`] value picking its best rendition
//!
//! Handles borrow the [`ApiClient`](pipaw_client::ApiClient) they were
//! created with and call it only when a field they need is not loaded yet.
//! Everything is synchronous and single-threaded.
//!
//! # Example
//!
//! ```
//! use pipaw_client::mock::ScriptedClient;
//! use pipaw_model::User;
//! use serde_json::json;
//!
//! let client = ScriptedClient::new()
//!     .with_user(42u64, json!({"user": {"pk": 42, "username": "ana"}}));
//!
//! let user = User::new(&client, 42u64);
//! assert_eq!(user.username().unwrap().as_deref(), Some("ana"));
//! assert_eq!(user.link().unwrap(), "https://www.instagram.com/ana/");
//! ```

mod comment;
mod entity;
mod error;
mod feed;
mod media;
mod post;
mod user;

pub use comment::Comment;
pub use entity::{EntityCore, Fields, PK_FIELD, RemoteEntity};
pub use error::{IdentityError, ModelError, ModelResult, RenditionKind};
pub use feed::{CommentFeed, NEXT_MAX_ID, Page, UserFeed};
pub use media::{
    MEDIA_TYPE_CAROUSEL, MEDIA_TYPE_PHOTO, MEDIA_TYPE_VIDEO, Media, MediaVersion, Photo, Video,
    best_version,
};
pub use post::Post;
pub use user::User;
