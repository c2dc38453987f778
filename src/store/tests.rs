use chrono::DateTime;

use super::{ChannelStore, StoreError};

#[test]
fn posts_of_unknown_channel_are_empty_not_an_error() {
    let store = ChannelStore::new();
    assert!(store.posts("nope").is_empty());
}

#[test]
fn add_post_appends_in_call_order() {
    let mut store = ChannelStore::new();
    store.add_post("Main", "a");
    store.add_post("Main", "b");
    store.add_post("Main", "c");

    let messages: Vec<&str> = store.posts("Main").iter().map(|p| p.message.as_str()).collect();
    assert_eq!(messages, vec!["a", "b", "c"]);
}

#[test]
fn add_post_creates_the_channel_implicitly() {
    let mut store = ChannelStore::new();
    let post = store.add_post("Fresh", "first");
    assert_eq!(post.message, "first");
    assert_eq!(store.posts("Fresh").len(), 1);
    assert_eq!(store.channels().len(), 1);
}

#[test]
fn channels_keep_creation_order() {
    let mut store = ChannelStore::new();
    store.add_channel("One").unwrap();
    store.add_post("Two", "x");
    store.add_channel("Three").unwrap();

    let names: Vec<&str> = store.channels().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Two", "Three"]);
}

#[test]
fn duplicate_channel_name_is_a_conflict() {
    let mut store = ChannelStore::new();
    let created = store.add_channel("Tech").unwrap();
    assert_eq!(created.name, "Tech");
    assert!(created.posts.is_empty());

    let err = store.add_channel("Tech").unwrap_err();
    assert_eq!(err, StoreError::ChannelExists("Tech".to_string()));

    // The store is unchanged: exactly one "Tech", still without posts.
    let techs: Vec<_> = store.channels().iter().filter(|c| c.name == "Tech").collect();
    assert_eq!(techs.len(), 1);
    assert!(techs[0].posts.is_empty());
}

#[test]
fn add_channel_conflicts_with_implicitly_created_channels_too() {
    let mut store = ChannelStore::new();
    store.add_post("Main", "hello");
    assert!(store.add_channel("Main").is_err());
}

#[test]
fn empty_strings_are_valid_degenerate_values() {
    let mut store = ChannelStore::new();
    let post = store.add_post("", "");
    assert_eq!(post.message, "");
    assert_eq!(store.posts("").len(), 1);
    store.add_channel("").unwrap_err();
}

#[test]
fn seeded_store_matches_the_startup_state() {
    let store = ChannelStore::seeded();
    let names: Vec<&str> = store.channels().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Main", "Cats"]);
    assert_eq!(store.posts("Main")[0].message, "hello world");
    assert_eq!(store.posts("Cats")[0].message, "Meow");
}

#[test]
fn post_timestamp_serializes_as_iso_8601() {
    let mut store = ChannelStore::new();
    let post = store.add_post("Main", "hello");

    let value = serde_json::to_value(&post).unwrap();
    assert_eq!(value["message"], "hello");
    let date = value["date"].as_str().expect("date must be a string");
    DateTime::parse_from_rfc3339(date).expect("date must round-trip as ISO-8601");
}
