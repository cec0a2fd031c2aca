use super::constants::SCROLL_EPSILON;

/// Linear interpolation from `current` towards `target` by `t`.
#[inline]
pub fn lerp(current: f64, target: f64, t: f64) -> f64 {
    current + (target - current) * t
}

/// One smoothed scroll axis driving a gallery.
///
/// Input handlers only ever write `target`; `step` is the only writer of
/// `current`. With `lerp` in (0, 1] `current` approaches `target` without
/// overshooting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAxis {
    pub current: f64,
    pub target: f64,
    pub lerp: f64,
}

impl ScrollAxis {
    pub fn new(lerp: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            lerp: lerp.clamp(f64::MIN_POSITIVE, 1.0),
        }
    }

    /// Advance `current` one frame towards `target` and return it.
    pub fn step(&mut self) -> f64 {
        self.current = lerp(self.current, self.target, self.lerp);
        if (self.target - self.current).abs() < SCROLL_EPSILON {
            self.current = self.target;
        }
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0.0;
        self.target = 0.0;
    }

    pub fn at_rest(&self) -> bool {
        self.current == self.target
    }
}

/// Vertical DOM scroll of a page's content wrapper, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageScroll {
    pub current: f64,
    pub target: f64,
    pub last: f64,
    pub limit: f64,
}

impl PageScroll {
    /// `limit` is the scrollable distance; content shorter than the viewport
    /// does not scroll at all.
    pub fn set_limit(&mut self, content_height: f64, viewport_height: f64) {
        self.limit = (content_height - viewport_height).max(0.0);
    }

    pub fn on_wheel(&mut self, pixel_y: f64) {
        self.target += pixel_y;
    }

    /// Clamp, interpolate and settle; returns the offset to apply.
    pub fn update(&mut self, t: f64) -> f64 {
        self.target = self.target.clamp(0.0, self.limit);
        self.last = self.current;
        self.current = lerp(self.current, self.target, t);
        if self.current < SCROLL_EPSILON {
            self.current = 0.0;
        }
        self.current
    }
}
