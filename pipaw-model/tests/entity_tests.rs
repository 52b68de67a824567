mod common;

use pipaw_client::mock::{Call, ScriptedClient};
use pipaw_client::{ClientError, Pk};
use pipaw_model::{IdentityError, ModelError, Post, RemoteEntity, User};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};

fn object(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().expect("object fixture")
}

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn stub_has_its_pk() {
    let client = ScriptedClient::new();
    let user = User::new(&client, 5u64);
    assert_eq!(user.pk(), Pk::new(5));
    assert_eq!(user.peek("pk"), Some(json!(5)));
    assert_eq!(client.call_count(), 0);
}

#[test]
fn entities_with_same_pk_are_equal_regardless_of_fields() {
    let client = ScriptedClient::new();
    let stub = User::new(&client, 5u64);
    let seeded = User::from_fragment(&client, json!({"pk": 5, "username": "ana", "full_name": "Ana"})).unwrap();
    let other = User::new(&client, 6u64);

    assert_eq!(stub, seeded);
    assert_ne!(stub, other);
    assert!(stub == Pk::new(5));
}

#[test]
fn entities_work_as_set_and_map_keys() {
    let client = ScriptedClient::new();
    let mut set = HashSet::new();
    set.insert(Post::new(&client, 1u64));
    set.insert(Post::from_fragment(&client, json!({"pk": "1", "code": "abc"})).unwrap());
    set.insert(Post::new(&client, 2u64));
    assert_eq!(set.len(), 2);

    let mut map = HashMap::new();
    map.insert(User::new(&client, 9u64), "stub");
    let hydrated = User::from_fragment(&client, json!({"pk": 9, "username": "zed"})).unwrap();
    assert_eq!(map.get(&hydrated), Some(&"stub"));
}

#[test]
fn mismatched_pk_is_an_identity_error() {
    let client = ScriptedClient::new();
    let err = User::with_data(&client, Some(Pk::new(5)), object(json!({"pk": 7}))).unwrap_err();
    assert!(matches!(
        err,
        ModelError::Identity(IdentityError::PkMismatch { given, embedded })
            if given == Pk::new(5) && embedded == Pk::new(7)
    ));
}

#[test]
fn missing_pk_is_an_identity_error() {
    let client = ScriptedClient::new();
    let err = Post::with_data(&client, None, object(json!({}))).unwrap_err();
    assert!(matches!(err, ModelError::Identity(IdentityError::MissingPk)));

    let err = Post::from_fragment(&client, json!({"pk": null, "code": "x"})).unwrap_err();
    assert!(matches!(err, ModelError::Identity(IdentityError::MissingPk)));
}

#[test]
fn unparseable_pk_is_an_identity_error() {
    let client = ScriptedClient::new();
    let err = User::from_fragment(&client, json!({"pk": "abc"})).unwrap_err();
    assert!(matches!(err, ModelError::Identity(IdentityError::InvalidPk(_))));
}

#[test]
fn matching_explicit_and_embedded_pk_is_accepted() {
    let client = ScriptedClient::new();
    let user = User::with_data(&client, Some(Pk::new(7)), object(json!({"pk": "7", "username": "x"}))).unwrap();
    assert_eq!(user.pk(), Pk::new(7));
}

#[test]
fn explicit_pk_is_written_into_data_without_one() {
    let client = ScriptedClient::new();
    let user = User::with_data(&client, Some(Pk::new(3)), object(json!({"username": "x"}))).unwrap();
    assert_eq!(user.peek("pk"), Some(json!(3)));
    assert_eq!(user.peek("username"), Some(json!("x")));
}

#[test]
fn non_object_fragment_is_malformed() {
    let client = ScriptedClient::new();
    let err = User::from_fragment(&client, json!([1, 2])).unwrap_err();
    assert!(matches!(err, ModelError::Malformed(_)));
}

#[test]
fn display_shows_kind_and_pk() {
    let client = ScriptedClient::new();
    assert_eq!(User::new(&client, 5u64).to_string(), "User(pk=5)");
    assert_eq!(Post::new(&client, 8u64).to_string(), "Post(pk=8)");
    assert!(format!("{:?}", Post::new(&client, 8u64)).contains("pk"));
}

// ── Lazy resolution ──────────────────────────────────────────────

#[test]
fn missing_field_resolves_exactly_once() {
    common::init_tracing();
    let client = ScriptedClient::new().with_user(5u64, json!({"user": {"pk": 5, "username": "ana", "full_name": "Ana B"}}));
    let user = User::new(&client, 5u64);

    assert_eq!(user.get("username").unwrap(), Some(json!("ana")));
    assert_eq!(client.calls(), vec![Call::UserInfo(Pk::new(5))]);

    // Everything from that response is now loaded.
    assert_eq!(user.get("full_name").unwrap(), Some(json!("Ana B")));
    assert_eq!(client.call_count(), 1);
}

#[test]
fn known_fields_never_resolve() {
    let client = ScriptedClient::new();
    let user = User::from_fragment(&client, json!({"pk": 5, "username": "ana", "bio": null})).unwrap();
    assert_eq!(user.username().unwrap().as_deref(), Some("ana"));
    assert_eq!(user.get("bio").unwrap(), Some(Value::Null));
    assert_eq!(client.call_count(), 0);
}

#[test]
fn absent_field_returns_default_after_resolution() {
    let client = ScriptedClient::new().with_user(5u64, json!({"user": {"pk": 5}}));
    let user = User::new(&client, 5u64);

    assert_eq!(user.get("nickname").unwrap(), None);
    assert_eq!(user.get_or("nickname", json!("n/a")).unwrap(), json!("n/a"));
    assert!(matches!(user.require("nickname"), Err(ModelError::MissingField(f)) if f == "nickname"));
}

#[test]
fn permanently_absent_field_resolves_on_every_read() {
    let client = ScriptedClient::new().with_user(5u64, json!({"user": {"pk": 5}}));
    let user = User::new(&client, 5u64);

    for _ in 0..3 {
        assert_eq!(user.get("nickname").unwrap(), None);
    }
    assert_eq!(client.call_count(), 3);
}

#[test]
fn peek_never_resolves() {
    let client = ScriptedClient::new().with_user(5u64, json!({"user": {"pk": 5, "username": "ana"}}));
    let user = User::new(&client, 5u64);
    assert_eq!(user.peek("username"), None);
    assert_eq!(client.call_count(), 0);
}

#[test]
fn resolution_replaces_the_whole_field_map() {
    let client = ScriptedClient::new().with_media(3u64, json!({"pk": 3, "code": "fresh"}));
    let post = Post::from_fragment(&client, json!({"pk": 3, "stale": true})).unwrap();

    assert_eq!(post.code().unwrap().as_deref(), Some("fresh"));
    assert_eq!(post.peek("stale"), None);
    assert_eq!(post.fields().len(), 2);
}

#[test]
fn transport_errors_propagate() {
    let client = ScriptedClient::new();
    let user = User::new(&client, 404u64);
    let err = user.username().unwrap_err();
    assert!(matches!(err, ModelError::Client(ClientError::NotFound(_))));
    // The stub is left as it was.
    assert_eq!(user.fields().len(), 1);
}

#[test]
fn user_info_without_user_record_is_malformed() {
    let client = ScriptedClient::new().with_user(5u64, json!({"status": "ok"}));
    let user = User::new(&client, 5u64);
    assert!(matches!(user.username(), Err(ModelError::Malformed(_))));
}

#[test]
fn typed_getters_convert_values() {
    let client = ScriptedClient::new();
    let user = User::from_fragment(
        &client,
        json!({"pk": 5, "is_private": true, "media_count": 12, "follower_count": 3, "score": -2, "ratio": 0.5}),
    )
    .unwrap();

    assert_eq!(user.is_private().unwrap(), Some(true));
    assert_eq!(user.media_count().unwrap(), Some(12));
    assert_eq!(user.follower_count().unwrap(), Some(3));
    assert_eq!(user.get_i64("score").unwrap(), Some(-2));
    assert_eq!(user.get_f64("ratio").unwrap(), Some(0.5));
    // Wrong type reads as absent, without another request.
    assert_eq!(user.get_str("media_count").unwrap(), None);
    assert_eq!(client.call_count(), 0);
}

#[test]
fn user_link_uses_username() {
    let client = ScriptedClient::new();
    let user = User::from_fragment(&client, json!({"pk": 5, "username": "ana"})).unwrap();
    assert_eq!(user.link().unwrap(), "https://www.instagram.com/ana/");
}
