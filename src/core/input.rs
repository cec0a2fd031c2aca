use super::constants::{WHEEL_LINE_HEIGHT, WHEEL_PAGE_HEIGHT};

/// Start and latest position of a drag along one screen axis, in CSS pixels.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    /// Positive when the pointer moved towards the origin (left / up).
    #[inline]
    pub fn distance(&self) -> f64 {
        self.start - self.end
    }
}

/// Mouse and touch collapse into this one model.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub x: Span,
    pub y: Span,
}

#[derive(Default, Clone, Copy, Debug)]
pub struct PointerTracker {
    pointer: Pointer,
    down: bool,
}

impl PointerTracker {
    pub fn down(&mut self, x: f64, y: f64) -> Pointer {
        self.down = true;
        self.pointer.x = Span { start: x, end: x };
        self.pointer.y = Span { start: y, end: y };
        self.pointer
    }

    /// `None` while no button or finger is down.
    pub fn moved(&mut self, x: f64, y: f64) -> Option<Pointer> {
        if !self.down {
            return None;
        }
        self.pointer.x.end = x;
        self.pointer.y.end = y;
        Some(self.pointer)
    }

    pub fn up(&mut self, x: f64, y: f64) -> Pointer {
        self.down = false;
        self.pointer.x.end = x;
        self.pointer.y.end = y;
        self.pointer
    }

    pub fn is_down(&self) -> bool {
        self.down
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct WheelDelta {
    pub pixel_x: f64,
    pub pixel_y: f64,
}

/// Convert a raw wheel event (`deltaX`, `deltaY`, `deltaMode`) into pixels.
pub fn normalize_wheel(delta_x: f64, delta_y: f64, delta_mode: u32) -> WheelDelta {
    let unit = match delta_mode {
        1 => WHEEL_LINE_HEIGHT,
        2 => WHEEL_PAGE_HEIGHT,
        _ => 1.0,
    };
    WheelDelta {
        pixel_x: delta_x * unit,
        pixel_y: delta_y * unit,
    }
}
