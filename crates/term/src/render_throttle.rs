use std::time::Duration;

/// Decides when the viewer repaints.
///
/// The document's revision counter stands in for a content fingerprint.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_idle_interval_ms: u64,
    last_render_ms: u64,
    last_revision: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_idle_interval_ms: u64) -> Self {
        Self {
            min_idle_interval_ms,
            last_render_ms: 0,
            last_revision: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// - When `animating=true` (frame tasks pending): always render.
    /// - Otherwise: render immediately when `revision` moved, else at most
    ///   once per `min_idle_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, revision: u64, animating: bool) -> bool {
        if !self.has_rendered || animating || revision != self.last_revision {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_revision = revision;
            return true;
        }

        if now_ms.saturating_sub(self.last_render_ms) >= self.min_idle_interval_ms {
            self.last_render_ms = now_ms;
            return true;
        }

        false
    }

    /// Forget the last frame so the next call renders (after a resize).
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
pub fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
