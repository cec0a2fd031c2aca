use super::scene_graph::{MeshId, Transform};
use super::viewport::{Rect, ScreenSize, Viewport};
use glam::{DVec2, DVec3};

/// One gallery plane mirroring a DOM media element.
///
/// `extra` is the wrap offset this item has accumulated on its own; it only
/// ever changes by whole gallery sizes.
#[derive(Clone, Debug)]
pub struct MediaItem<E> {
    element: E,
    mesh: MeshId,
    index: usize,
    bounds: Option<Rect>,
    scale: DVec2,
    position: DVec2,
    pub extra: DVec2,
    pub rotation: f64,
}

impl<E> MediaItem<E> {
    pub fn new(element: E, mesh: MeshId, index: usize) -> Self {
        Self {
            element,
            mesh,
            index,
            bounds: None,
            scale: DVec2::ZERO,
            position: DVec2::ZERO,
            extra: DVec2::ZERO,
            rotation: 0.0,
        }
    }

    /// Take fresh DOM bounds, drop accumulated wrap offsets and re-place at
    /// scroll zero.
    pub fn on_resize(&mut self, bounds: Rect, viewport: Viewport, screen: ScreenSize) {
        self.bounds = Some(bounds);
        self.extra = DVec2::ZERO;
        self.scale = DVec2::new(
            bounds.width / screen.width * viewport.width,
            bounds.height / screen.height * viewport.height,
        );
        self.place(DVec2::ZERO, viewport, screen);
    }

    /// World position for a gallery scroll (CSS pixels): the DOM position
    /// minus the scroll, projected into world units, plus `extra`.
    pub fn place(&mut self, scroll: DVec2, viewport: Viewport, screen: ScreenSize) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let x = (bounds.left - scroll.x) / screen.width;
        let y = (bounds.top - scroll.y) / screen.height;
        self.position.x =
            -viewport.width / 2.0 + self.scale.x / 2.0 + x * viewport.width + self.extra.x;
        self.position.y =
            viewport.height / 2.0 - self.scale.y / 2.0 - y * viewport.height + self.extra.y;
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: DVec3::new(self.position.x, self.position.y, 0.0),
            scale: DVec3::new(self.scale.x, self.scale.y, 1.0),
            rotation_z: self.rotation,
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn scale(&self) -> DVec2 {
        self.scale
    }

    pub fn is_measured(&self) -> bool {
        self.bounds.is_some()
    }
}
