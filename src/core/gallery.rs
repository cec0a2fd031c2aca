use super::constants::{MEDIA_PALETTE, SCROLL_LERP, WRAP_JITTER_RADIANS};
use super::document::Document;
use super::input::{Pointer, WheelDelta};
use super::media::MediaItem;
use super::scene_graph::{GroupId, SceneGraph};
use super::scroll::ScrollAxis;
use super::viewport::{ScreenSize, Viewport};
use glam::{DVec2, DVec3};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axes {
    Horizontal,
    Both,
}

/// Which way the content is travelling on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug)]
struct Layout {
    viewport: Viewport,
    screen: ScreenSize,
    // world size of the DOM wrapper; one full wrap period per axis
    size: DVec2,
}

/// A finite strip of media planes that scrolls forever.
///
/// Scroll values are CSS pixels. Every item wraps on its own: once its
/// trailing edge leaves the viewport in the direction of travel it jumps one
/// gallery size the other way via its `extra` offset.
pub struct Gallery<E> {
    wrapper: E,
    axes: Axes,
    group: GroupId,
    items: Vec<MediaItem<E>>,
    x: ScrollAxis,
    y: ScrollAxis,
    anchor: DVec2,
    scroll: DVec2,
    direction_x: Option<HorizontalDirection>,
    direction_y: Option<VerticalDirection>,
    layout: Option<Layout>,
}

impl<E: Clone> Gallery<E> {
    /// Creates one mesh per element inside a fresh group of `graph`.
    pub fn new(graph: &mut SceneGraph, wrapper: E, elements: Vec<E>, axes: Axes) -> Self {
        let group = graph.create_group();
        let items = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| {
                let color = MEDIA_PALETTE[index % MEDIA_PALETTE.len()];
                let mesh = graph.create_mesh(group, color)?;
                Some(MediaItem::new(element, mesh, index))
            })
            .collect();
        Self {
            wrapper,
            axes,
            group,
            items,
            x: ScrollAxis::new(SCROLL_LERP),
            y: ScrollAxis::new(SCROLL_LERP),
            anchor: DVec2::ZERO,
            scroll: DVec2::ZERO,
            direction_x: None,
            direction_y: None,
            layout: None,
        }
    }

    /// Re-measure the wrapper and every item, and re-anchor scrolling at 0.
    pub fn on_resize<D>(&mut self, viewport: Viewport, document: &D, graph: &mut SceneGraph)
    where
        D: Document<Element = E>,
    {
        let screen = document.screen();
        let bounds = document.bounds(&self.wrapper);
        let (per_px_x, per_px_y) = viewport.per_pixel(screen);
        self.layout = Some(Layout {
            viewport,
            screen,
            size: DVec2::new(bounds.width * per_px_x, bounds.height * per_px_y),
        });

        self.x.reset();
        self.y.reset();
        self.anchor = DVec2::ZERO;
        self.scroll = DVec2::ZERO;

        for item in &mut self.items {
            let item_bounds = document.bounds(item.element());
            item.on_resize(item_bounds, viewport, screen);
            graph.set_transform(item.mesh(), item.transform());
        }
    }

    pub fn on_touch_down(&mut self, _pointer: &Pointer) {
        self.anchor = DVec2::new(self.x.current, self.y.current);
    }

    /// Dragging moves the strip 1:1 with the pointer.
    pub fn on_touch_move(&mut self, pointer: &Pointer) {
        self.x.target = self.anchor.x + pointer.x.distance();
        if self.axes == Axes::Both {
            self.y.target = self.anchor.y + pointer.y.distance();
        }
    }

    pub fn on_wheel(&mut self, delta: &WheelDelta) {
        self.x.target += delta.pixel_x;
        if self.axes == Axes::Both {
            self.y.target += delta.pixel_y;
        }
    }

    /// Per-frame step. Does nothing until the first `on_resize`.
    pub fn update<R: Rng>(&mut self, graph: &mut SceneGraph, rng: &mut R) {
        let Some(layout) = self.layout else {
            return;
        };

        let x = self.x.step();
        let y = match self.axes {
            Axes::Both => self.y.step(),
            Axes::Horizontal => self.y.current,
        };

        // a frame without movement keeps the previous direction
        if self.scroll.x < x {
            self.direction_x = Some(HorizontalDirection::Left);
        } else if self.scroll.x > x {
            self.direction_x = Some(HorizontalDirection::Right);
        }
        if self.scroll.y < y {
            self.direction_y = Some(VerticalDirection::Up);
        } else if self.scroll.y > y {
            self.direction_y = Some(VerticalDirection::Down);
        }
        self.scroll = DVec2::new(x, y);

        let half_view = DVec2::new(layout.viewport.width, layout.viewport.height) / 2.0;
        for item in &mut self.items {
            let half = item.scale() / 2.0;
            let position = item.position();
            let mut wrapped = false;

            if layout.size.x > 0.0 {
                match self.direction_x {
                    Some(HorizontalDirection::Left) if position.x + half.x < -half_view.x => {
                        item.extra.x += layout.size.x;
                        wrapped = true;
                    }
                    Some(HorizontalDirection::Right) if position.x - half.x > half_view.x => {
                        item.extra.x -= layout.size.x;
                        wrapped = true;
                    }
                    _ => {}
                }
            }

            if layout.size.y > 0.0 {
                match self.direction_y {
                    Some(VerticalDirection::Up) if position.y - half.y > half_view.y => {
                        item.extra.y -= layout.size.y;
                        wrapped = true;
                    }
                    Some(VerticalDirection::Down) if position.y + half.y < -half_view.y => {
                        item.extra.y += layout.size.y;
                        wrapped = true;
                    }
                    _ => {}
                }
            }

            if wrapped {
                item.rotation = rng.gen_range(-WRAP_JITTER_RADIANS..=WRAP_JITTER_RADIANS);
                log::debug!(
                    "[gallery] item {} wrapped, extra=({:.3},{:.3})",
                    item.index(),
                    item.extra.x,
                    item.extra.y
                );
            }

            item.place(self.scroll, layout.viewport, layout.screen);
            graph.set_transform(item.mesh(), item.transform());
        }
    }

    /// Shift the whole strip, e.g. to follow the DOM scroll of its page.
    pub fn set_offset(&self, graph: &mut SceneGraph, offset: DVec3) {
        graph.set_group_position(self.group, offset);
    }

    /// Release every mesh of this gallery from the scene graph.
    pub fn destroy(self, graph: &mut SceneGraph) -> usize {
        graph.remove_group(self.group)
    }

    pub fn items(&self) -> &[MediaItem<E>] {
        &self.items
    }

    pub fn scroll_x(&self) -> &ScrollAxis {
        &self.x
    }

    pub fn scroll_y(&self) -> &ScrollAxis {
        &self.y
    }

    pub fn direction_x(&self) -> Option<HorizontalDirection> {
        self.direction_x
    }

    pub fn direction_y(&self) -> Option<VerticalDirection> {
        self.direction_y
    }

    /// World size of one wrap period, once measured.
    pub fn size(&self) -> Option<DVec2> {
        self.layout.map(|l| l.size)
    }

    pub fn axes(&self) -> Axes {
        self.axes
    }

    pub fn group(&self) -> GroupId {
        self.group
    }
}
