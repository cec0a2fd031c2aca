// Shared tuning constants for scrolling, galleries, tweens and the scene camera.

// Scrolling
pub const SCROLL_LERP: f64 = 0.1; // fraction of the remaining distance covered per frame
pub const SCROLL_EPSILON: f64 = 0.01; // below this distance a scroll axis snaps to rest
pub const PAGE_SCROLL_LERP: f64 = 0.1;

// Wheel normalisation (DOM_DELTA_LINE / DOM_DELTA_PAGE to pixels)
pub const WHEEL_LINE_HEIGHT: f64 = 40.0;
pub const WHEEL_PAGE_HEIGHT: f64 = 800.0;

// Gallery wrap
pub const WRAP_JITTER_RADIANS: f64 = std::f64::consts::PI * 0.03; // max |z rotation| applied on wrap

// Camera
pub const CAMERA_FOV_DEGREES: f64 = 45.0;
pub const CAMERA_Z: f64 = 5.0;
pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 100.0;

// Tweens (seconds)
pub const DEFAULT_TWEEN_SECS: f64 = 0.5;
pub const PAGE_FADE_SECS: f64 = 0.5;
pub const ANIMATION_IN_DELAY_SECS: f64 = 0.5;
pub const TITLE_LINE_STAGGER_SECS: f64 = 0.2;
pub const PARAGRAPH_LINE_STAGGER_SECS: f64 = 0.1;
pub const LINE_SLIDE_SECS: f64 = 1.5;
pub const LABEL_FADE_SECS: f64 = 1.0;
pub const NAVIGATION_COLOR_SECS: f64 = 1.5;
pub const NAVIGATION_ITEM_SECS: f64 = 0.75;

// Navigation colours (sRGB)
pub const COLOR_WHITE: [u8; 3] = [0xff, 0xff, 0xff];
pub const COLOR_BRIGHT_GREY: [u8; 3] = [0x37, 0x38, 0x4c];

// Plane tints until textures are bound, cycled by media index (linear RGBA)
pub const MEDIA_PALETTE: [[f32; 4]; 4] = [
    [0.86, 0.80, 0.72, 1.0], // sand
    [0.55, 0.60, 0.66, 1.0], // slate
    [0.78, 0.66, 0.60, 1.0], // clay
    [0.42, 0.45, 0.40, 1.0], // moss
];
