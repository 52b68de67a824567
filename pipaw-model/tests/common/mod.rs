//! Shared fixtures for the model tests.
#![allow(dead_code)]

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness (`RUST_LOG=debug`).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn version(url: &str, width: u32, height: u32) -> Value {
    json!({"url": url, "width": width, "height": height})
}

pub fn photo_fragment(pk: u64) -> Value {
    json!({
        "pk": pk,
        "media_type": 1,
        "original_width": 1080,
        "original_height": 1350,
        "image_versions2": {"candidates": [
            version("https://cdn.test/p-small.jpg", 320, 400),
            version("https://cdn.test/p-full.jpg", 1080, 1350),
        ]},
    })
}

pub fn video_fragment(pk: u64) -> Value {
    json!({
        "pk": pk,
        "media_type": 2,
        "original_width": 720,
        "original_height": 1280,
        "video_duration": 12.5,
        "view_count": 100,
        "play_count": 250,
        "has_audio": true,
        "image_versions2": {"candidates": [
            version("https://cdn.test/v-thumb.jpg", 720, 1280),
        ]},
        "video_versions": [
            version("https://cdn.test/v-480.mp4", 480, 854),
            version("https://cdn.test/v-720.mp4", 720, 1280),
        ],
    })
}
