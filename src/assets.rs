use fnv::{FnvHashMap, FnvHashSet};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Relative URL for an asset path. Paths already rooted at `./` pass through.
pub fn asset_url(path: &str) -> String {
    if path.starts_with("./") {
        return path.to_string();
    }
    format!("./{}", path.trim_start_matches('/'))
}

pub fn asset_path(dir: &str, file: &str) -> String {
    asset_url(&format!("{}/{}", dir, file))
}

/// Shared flag that flips to dead when the scene is disposed. Async load
/// completions check it before touching scene state.
#[derive(Debug, Clone)]
pub struct Liveness(Rc<Cell<bool>>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl Liveness {
    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn kill(&self) {
        self.0.set(false);
    }
}

/// Hand-off cell between one async writer (a load completion) and the frame
/// callback. A write replaces the whole value; the reader takes it whole.
/// Writes after the scene died are dropped.
pub struct AssetSlot<T> {
    value: Rc<RefCell<Option<T>>>,
    live: Liveness,
}

impl<T> Clone for AssetSlot<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            live: self.live.clone(),
        }
    }
}

impl<T> AssetSlot<T> {
    pub fn new(live: Liveness) -> Self {
        Self {
            value: Rc::new(RefCell::new(None)),
            live,
        }
    }

    /// Store `value`, replacing anything not yet taken. Returns false (and
    /// drops the value) if the scene is gone.
    pub fn put(&self, value: T) -> bool {
        if !self.live.is_alive() {
            return false;
        }
        *self.value.borrow_mut() = Some(value);
        true
    }

    pub fn take(&self) -> Option<T> {
        if !self.live.is_alive() {
            return None;
        }
        self.value.borrow_mut().take()
    }

    pub fn is_pending(&self) -> bool {
        self.value.borrow().is_some()
    }

    pub fn clear(&self) {
        self.value.borrow_mut().take();
    }
}

/// Loaded textures keyed by file name so revisiting a section never refetches.
pub struct TextureCache<T> {
    entries: FnvHashMap<String, T>,
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self {
            entries: FnvHashMap::default(),
        }
    }
}

impl<T: Clone> TextureCache<T> {
    pub fn get(&self, name: &str) -> Option<T> {
        self.entries.get(name).cloned()
    }

    pub fn insert(&mut self, name: &str, texture: T) {
        self.entries.insert(name.to_string(), texture);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// What the loader should do for a background request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStart<T> {
    /// Already loaded; hand it over now.
    Cached(T),
    /// Start a load for it.
    Spawn,
    /// A load for it is already running.
    Joined,
    Ignored,
}

/// Background requests: cached textures, loads in flight and the single
/// request whose completion may be faded in. A load that finishes after a
/// newer request is cached but not delivered.
pub struct RequestTracker<T> {
    cache: TextureCache<T>,
    in_flight: FnvHashSet<String>,
    wanted: Option<String>,
}

impl<T> Default for RequestTracker<T> {
    fn default() -> Self {
        Self {
            cache: TextureCache::default(),
            in_flight: FnvHashSet::default(),
            wanted: None,
        }
    }
}

impl<T: Clone> RequestTracker<T> {
    pub fn request(&mut self, name: &str) -> LoadStart<T> {
        if name.is_empty() {
            return LoadStart::Ignored;
        }
        self.wanted = Some(name.to_string());
        if let Some(texture) = self.cache.get(name) {
            return LoadStart::Cached(texture);
        }
        if self.in_flight.insert(name.to_string()) {
            LoadStart::Spawn
        } else {
            LoadStart::Joined
        }
    }

    /// A load finished. Returns true if it should be delivered.
    pub fn complete(&mut self, name: &str, texture: T) -> bool {
        self.in_flight.remove(name);
        self.cache.insert(name, texture);
        self.is_wanted(name)
    }

    /// A load failed; a later request for `name` starts a fresh one.
    pub fn fail(&mut self, name: &str) {
        self.in_flight.remove(name);
    }

    pub fn is_wanted(&self, name: &str) -> bool {
        self.wanted.as_deref() == Some(name)
    }

    pub fn is_loading(&self, name: &str) -> bool {
        self.in_flight.contains(name)
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.in_flight.clear();
        self.wanted = None;
    }
}
