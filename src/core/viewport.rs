use super::constants::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_Z};
use glam::{DMat4, DVec3};

/// Client rectangle of a DOM element in CSS pixels.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Window inner size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// World-space extent visible at z = 0, shared by every media item.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// World units per CSS pixel along x and y.
    pub fn per_pixel(&self, screen: ScreenSize) -> (f64, f64) {
        (self.width / screen.width, self.height / screen.height)
    }
}

/// Right-handed perspective camera looking down -z at the origin.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    pub aspect: f64,
    pub fovy_radians: f64,
    pub znear: f64,
    pub zfar: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: DVec3::new(0.0, 0.0, CAMERA_Z),
            target: DVec3::ZERO,
            up: DVec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn set_aspect(&mut self, screen: ScreenSize) {
        self.aspect = screen.aspect();
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Size of the frustum slice through the origin plane.
    pub fn viewport(&self) -> Viewport {
        let distance = (self.eye - self.target).length();
        let height = 2.0 * (self.fovy_radians / 2.0).tan() * distance;
        Viewport {
            width: height * self.aspect,
            height,
        }
    }
}
