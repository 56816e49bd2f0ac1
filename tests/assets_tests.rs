// Host-side tests for asset URLs, load hand-off slots, the texture cache and
// background request tracking.

#![allow(dead_code)]
mod assets {
    include!("../src/assets.rs");
}

use assets::*;

#[test]
fn urls_are_relative_to_the_page() {
    assert_eq!(asset_url("images/1-min.jpg"), "./images/1-min.jpg");
    assert_eq!(asset_url("/models/ohm4.glb"), "./models/ohm4.glb");
    assert_eq!(asset_url("./videos/swirl-loop.mp4"), "./videos/swirl-loop.mp4");
    assert_eq!(asset_path("images", "2-min.jpg"), "./images/2-min.jpg");
}

#[test]
fn slot_keeps_only_the_latest_write() {
    let slot = AssetSlot::new(Liveness::default());
    assert!(slot.put(1));
    assert!(slot.put(2));
    assert!(slot.is_pending());
    assert_eq!(slot.take(), Some(2));
    assert_eq!(slot.take(), None);
}

#[test]
fn completions_after_dispose_are_dropped() {
    let live = Liveness::default();
    let slot = AssetSlot::new(live.clone());
    let writer = slot.clone();
    live.kill();
    assert!(!live.is_alive());
    assert!(!writer.put("late"));
    assert_eq!(slot.take(), None);
}

#[test]
fn pending_value_is_unreadable_once_dead() {
    let live = Liveness::default();
    let slot = AssetSlot::new(live.clone());
    slot.put(7);
    live.kill();
    assert_eq!(slot.take(), None);
}

#[test]
fn cache_hands_out_shared_copies() {
    let mut cache: TextureCache<std::rc::Rc<u8>> = TextureCache::default();
    assert!(cache.is_empty());
    let tex = std::rc::Rc::new(5u8);
    cache.insert("1-min.jpg", tex.clone());
    assert!(cache.contains("1-min.jpg"));
    let hit = cache.get("1-min.jpg").expect("cached");
    assert!(std::rc::Rc::ptr_eq(&hit, &tex));
    assert!(cache.get("2-min.jpg").is_none());
    cache.insert("1-min.jpg", std::rc::Rc::new(6));
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn stale_load_is_cached_but_not_delivered() {
    let mut requests: RequestTracker<u8> = RequestTracker::default();
    assert_eq!(requests.request("2-min.jpg"), LoadStart::Spawn);
    assert_eq!(requests.request("1-min.jpg"), LoadStart::Spawn);
    assert!(!requests.complete("2-min.jpg", 2));
    assert!(requests.complete("1-min.jpg", 1));
    assert_eq!(requests.cached_count(), 2);
    assert_eq!(requests.request("2-min.jpg"), LoadStart::Cached(2));
}

#[test]
fn repeated_request_joins_the_running_load() {
    let mut requests: RequestTracker<u8> = RequestTracker::default();
    assert_eq!(requests.request("2-min.jpg"), LoadStart::Spawn);
    assert_eq!(requests.request("2-min.jpg"), LoadStart::Joined);
    assert!(requests.is_loading("2-min.jpg"));
    assert!(requests.complete("2-min.jpg", 2));
    assert!(!requests.is_loading("2-min.jpg"));
}

#[test]
fn returning_to_a_loading_texture_delivers_it() {
    let mut requests: RequestTracker<u8> = RequestTracker::default();
    assert_eq!(requests.request("2-min.jpg"), LoadStart::Spawn);
    assert_eq!(requests.request("1-min.jpg"), LoadStart::Spawn);
    assert_eq!(requests.request("2-min.jpg"), LoadStart::Joined);
    assert!(!requests.complete("1-min.jpg", 1));
    assert!(requests.complete("2-min.jpg", 2));
}

#[test]
fn failed_load_can_be_retried() {
    let mut requests: RequestTracker<u8> = RequestTracker::default();
    assert_eq!(requests.request("3-min.jpg"), LoadStart::Spawn);
    requests.fail("3-min.jpg");
    assert!(!requests.is_loading("3-min.jpg"));
    assert_eq!(requests.cached_count(), 0);
    assert_eq!(requests.request("3-min.jpg"), LoadStart::Spawn);
}

#[test]
fn cached_request_supersedes_a_running_load() {
    let mut requests: RequestTracker<u8> = RequestTracker::default();
    requests.request("1-min.jpg");
    assert!(requests.complete("1-min.jpg", 1));
    assert_eq!(requests.request("2-min.jpg"), LoadStart::Spawn);
    assert_eq!(requests.request("1-min.jpg"), LoadStart::Cached(1));
    assert!(!requests.complete("2-min.jpg", 2));
}

#[test]
fn empty_name_is_ignored() {
    let mut requests: RequestTracker<u8> = RequestTracker::default();
    requests.request("1-min.jpg");
    assert_eq!(requests.request(""), LoadStart::Ignored);
    assert!(requests.is_wanted("1-min.jpg"));
    requests.clear();
    assert!(!requests.is_wanted("1-min.jpg"));
}
