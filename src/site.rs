use super::constants::{
    DEFAULT_TEXTURE, FADE_DURATION_SEC, MAX_RENDER_PIXELS, MODEL_FILE, VIDEO_FILE,
};
use super::keyframes::Keyframe;

/// A footer navigation entry and the background image it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub key: &'static str,
    pub label: &'static str,
    pub image: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        key: "mission",
        label: "Home",
        image: "1-min.jpg",
    },
    NavItem {
        key: "contact",
        label: "Mission",
        image: "2-min.jpg",
    },
    NavItem {
        key: "donations",
        label: "Donate",
        image: "3-min.jpg",
    },
    NavItem {
        key: "shop",
        label: "Shop",
        image: "4-min.jpg",
    },
    NavItem {
        key: "events",
        label: "Contact",
        image: "5-min.jpg",
    },
];

// One pose per nav view, top of the page to the bottom
pub const MODEL_STATES: [Keyframe; 5] = [
    Keyframe::new(1.0, 0.0, 0.0, 0.0),
    Keyframe::new(4.0, 2.5, 0.0, 1.0),
    Keyframe::new(7.0, 2.0, 0.0, 0.0),
    Keyframe::new(5.2, 1.5, -1.15, -3.0),
    Keyframe::new(1.0, 0.0, 0.0, -3.0),
];

pub fn nav_item(items: &[NavItem], key: &str) -> Option<NavItem> {
    items.iter().find(|i| i.key == key).copied()
}

/// Index of the section whose band contains the viewport's vertical centre.
/// Sections are one viewport tall.
pub fn centered_section(scroll_y: f64, viewport_h: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let vh = if viewport_h > 0.0 { viewport_h } else { 1.0 };
    let idx = ((scroll_y + vh * 0.5) / vh).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(count - 1)
    }
}

/// Scroll offset that brings the first section tagged `key` to the top.
pub fn section_scroll_top(section_navs: &[Option<&str>], key: &str, viewport_h: f64) -> Option<f64> {
    let idx = section_navs.iter().position(|n| *n == Some(key))?;
    let vh = if viewport_h > 0.0 { viewport_h } else { 1.0 };
    Some(idx as f64 * vh)
}

/// Nav key owning the centred section: its own `data-nav` if that names a nav
/// item, else the nearest earlier section that does, else the first item.
pub fn active_nav_key<'a>(
    section_navs: &[Option<&str>],
    centered: usize,
    items: &'a [NavItem],
) -> Option<&'a str> {
    let known = |k: &str| items.iter().find(|i| i.key == k).map(|i| i.key);
    if !section_navs.is_empty() {
        let start = centered.min(section_navs.len() - 1);
        for nav in section_navs[..=start].iter().rev() {
            if let Some(k) = nav.and_then(known) {
                return Some(k);
            }
        }
    }
    items.first().map(|i| i.key)
}

/// Scene construction options. Defaults describe the live site.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    pub keyframes: Vec<Keyframe>,
    /// Shown without a fade as soon as it loads.
    pub initial_texture: String,
    pub model_file: String,
    /// `None` keeps the dynamic surface on its procedural look.
    pub video_file: Option<String>,
    pub fade_duration_sec: f32,
    pub max_render_pixels: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            keyframes: MODEL_STATES.to_vec(),
            initial_texture: DEFAULT_TEXTURE.to_string(),
            model_file: MODEL_FILE.to_string(),
            video_file: Some(VIDEO_FILE.to_string()),
            fade_duration_sec: FADE_DURATION_SEC,
            max_render_pixels: MAX_RENDER_PIXELS,
        }
    }
}
