use pipaw_types::{Pk, RankToken};
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashSet;
use std::str::FromStr;

// ── Pk ───────────────────────────────────────────────────────────

#[test]
fn pk_from_integer_value() {
    assert_eq!(Pk::from_value(&json!(42)), Some(Pk::new(42)));
}

#[test]
fn pk_from_string_value() {
    assert_eq!(Pk::from_value(&json!("1234567890")), Some(Pk::new(1_234_567_890)));
}

#[test]
fn pk_from_invalid_values() {
    assert_eq!(Pk::from_value(&json!(-1)), None);
    assert_eq!(Pk::from_value(&json!(1.5)), None);
    assert_eq!(Pk::from_value(&json!("abc")), None);
    assert_eq!(Pk::from_value(&json!(null)), None);
    assert_eq!(Pk::from_value(&json!({"pk": 1})), None);
}

#[test]
fn pk_display_and_parse() {
    let pk = Pk::new(987);
    assert_eq!(pk.to_string(), "987");
    assert_eq!(Pk::parse("987").unwrap(), pk);
    assert_eq!(Pk::from_str(" 987 ").unwrap(), pk);
}

#[test]
fn pk_parse_invalid() {
    let err = Pk::parse("not-a-pk").unwrap_err();
    assert!(err.to_string().contains("not-a-pk"));
}

#[test]
fn pk_serde_is_transparent() {
    let pk = Pk::new(7);
    assert_eq!(serde_json::to_value(pk).unwrap(), json!(7));
    let back: Pk = serde_json::from_value(json!(7)).unwrap();
    assert_eq!(back, pk);
}

#[test]
fn pk_into_json_value() {
    let value: serde_json::Value = Pk::new(11).into();
    assert_eq!(value, json!(11));
}

#[test]
fn pk_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(Pk::new(1));
    set.insert(Pk::from(1));
    assert_eq!(set.len(), 1);
}

proptest! {
    #[test]
    fn pk_string_and_number_agree(n in any::<u64>()) {
        prop_assert_eq!(Pk::from_value(&json!(n)), Pk::from_value(&json!(n.to_string())));
        prop_assert_eq!(Pk::from_value(&json!(n)).map(|pk| pk.get()), Some(n));
    }
}

// ── RankToken ────────────────────────────────────────────────────

#[test]
fn rank_token_new_is_unique() {
    assert_ne!(RankToken::new(), RankToken::new());
}

#[test]
fn rank_token_default_is_unique() {
    assert_ne!(RankToken::default(), RankToken::default());
}

#[test]
fn rank_token_display_and_parse() {
    let token = RankToken::new();
    let parsed = RankToken::parse(&token.to_string()).unwrap();
    assert_eq!(parsed, token);
    assert_eq!(RankToken::from_str(&token.to_string()).unwrap(), token);
}

#[test]
fn rank_token_from_uuid_roundtrip() {
    let uuid = uuid::Uuid::new_v4();
    assert_eq!(RankToken::from_uuid(uuid).as_uuid(), uuid);
}

#[test]
fn rank_token_parse_invalid() {
    assert!(RankToken::parse("garbage").is_err());
}
