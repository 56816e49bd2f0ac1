/// Snapshot of one scroll container's geometry, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Distance the container can actually scroll.
    #[inline]
    pub fn range(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }

    /// Position normalised to [0, 1]. A container that cannot scroll reports 0.
    #[inline]
    pub fn progress(&self) -> f32 {
        let denom = (self.scroll_height - self.viewport_height).max(1.0);
        (self.scroll_top / denom).clamp(0.0, 1.0) as f32
    }
}

/// Pick the authoritative scroller among candidates: the one with the largest
/// scrollable range. Returns `None` when nothing scrolls, in which case the
/// document itself is used.
pub fn pick_scroller(candidates: &[ScrollMetrics]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, m) in candidates.iter().enumerate() {
        let r = m.range();
        if r < 1.0 {
            continue;
        }
        match best {
            Some((_, br)) if r <= br => {}
            _ => best = Some((i, r)),
        }
    }
    best.map(|(i, _)| i)
}
